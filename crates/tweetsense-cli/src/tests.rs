use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tweetsense-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.api_url.is_none());
}

#[test]
fn parses_predict_text() {
    let cli = Cli::try_parse_from(["tweetsense-cli", "predict", "--text", "love this phone"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Predict { ref text }) if text == "love this phone"
    ));
}

#[test]
fn predict_requires_text() {
    assert!(Cli::try_parse_from(["tweetsense-cli", "predict"]).is_err());
}

#[test]
fn explore_defaults_match_service_defaults() {
    let cli = Cli::try_parse_from(["tweetsense-cli", "explore"]).expect("expected valid cli args");
    let Some(Commands::Explore(args)) = cli.command else {
        panic!("expected explore command");
    };
    let request = args.request();
    let defaults = ExploreRequest::default();
    assert_eq!(request.entity, defaults.entity);
    assert_eq!(request.keyword, defaults.keyword);
    assert_eq!(request.sentiment, defaults.sentiment);
    assert_eq!(request.wc_sentiment, defaults.wc_sentiment);
    assert_eq!(request.top_entities_n, defaults.top_entities_n);
    assert_eq!(request.leaderboard_n, defaults.leaderboard_n);
    assert_eq!(request.sample_n, defaults.sample_n);
    assert!(args.search.is_none());
}

#[test]
fn explore_parses_filters_and_outputs() {
    let cli = Cli::try_parse_from([
        "tweetsense-cli",
        "explore",
        "--entity",
        "Nvidia",
        "--keyword",
        "gpu",
        "--wc-sentiment",
        "Positive",
        "--samples",
        "5",
        "--search",
        "rtx",
        "--export-samples",
        "out.csv",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Explore(args)) = cli.command else {
        panic!("expected explore command");
    };
    let request = args.request();
    assert_eq!(request.entity, "Nvidia");
    assert_eq!(request.keyword, "gpu");
    assert_eq!(request.wc_sentiment, SentimentClass::Positive);
    assert_eq!(request.sample_n, 5);
    assert_eq!(args.search.as_deref(), Some("rtx"));
    assert_eq!(args.export_samples, Some(PathBuf::from("out.csv")));
}

#[test]
fn explore_rejects_unknown_wordcloud_class() {
    assert!(
        Cli::try_parse_from(["tweetsense-cli", "explore", "--wc-sentiment", "Irrelevant"])
            .is_err()
    );
}

#[test]
fn parses_batch_with_global_api_url() {
    let cli = Cli::try_parse_from([
        "tweetsense-cli",
        "batch",
        "--input",
        "tweets.csv",
        "--api-url",
        "http://model:9000",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.api_url.as_deref(), Some("http://model:9000"));
    assert!(matches!(
        cli.command,
        Some(Commands::Batch { ref input, output: None }) if input == &PathBuf::from("tweets.csv")
    ));
}
