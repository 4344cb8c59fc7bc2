use super::*;

#[test]
fn parses_locations_with_query_and_filter() {
    let cli = Cli::try_parse_from([
        "safemap",
        "locations",
        "--query",
        "centro",
        "--filter",
        "delegacia",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Locations {
            ref query,
            filter: CategoryFilter::Station,
            output: None,
        } if query == "centro"
    ));
}

#[test]
fn locations_defaults_to_all_and_empty_query() {
    let cli = Cli::try_parse_from(["safemap", "locations"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Locations {
            ref query,
            filter: CategoryFilter::All,
            output: None,
        } if query.is_empty()
    ));
}

#[test]
fn unknown_filter_is_rejected() {
    assert!(Cli::try_parse_from(["safemap", "locations", "--filter", "hospital"]).is_err());
}

#[test]
fn parses_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "safemap",
        "directions",
        "--lat",
        "-23.55",
        "--lng",
        "-46.63",
    ])
    .expect("expected valid cli args");
    let Commands::Directions { lat, lng } = cli.command else {
        panic!("expected directions");
    };
    assert!((lat - -23.55).abs() < f64::EPSILON);
    assert!((lng - -46.63).abs() < f64::EPSILON);
}

#[test]
fn parses_dial_number() {
    let cli = Cli::try_parse_from(["safemap", "dial", "(11) 180"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Dial { ref number } if number == "(11) 180"));
}

#[test]
fn parses_unit_commands() {
    let parse = |arg: &str| Cli::try_parse_from(["safemap", arg]).map(|c| c.command);
    assert!(matches!(parse("cache-clear"), Ok(Commands::CacheClear)));
    assert!(matches!(parse("report-error"), Ok(Commands::ReportError)));
    assert!(matches!(parse("panel"), Ok(Commands::Panel { output: None })));
    assert!(matches!(parse("protocol"), Ok(Commands::Protocol { output: None })));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["safemap"]).is_err());
}
