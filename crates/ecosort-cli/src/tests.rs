use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["ecosort-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_dropoffs_without_arguments() {
    let cli = Cli::try_parse_from(["ecosort-cli", "dropoffs"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Dropoffs {
            lat: None,
            lon: None,
            filter: None,
            radius: None,
            json: false,
            navigate: None,
        })
    ));
}

#[test]
fn parses_dropoffs_with_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "ecosort-cli",
        "dropoffs",
        "--lat",
        "-33.8688",
        "--lon",
        "-151.2093",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Dropoffs { lat, lon, .. }) = cli.command else {
        panic!("expected dropoffs command");
    };
    let center = lat.zip(lon).expect("both coordinates parsed");
    assert!((center.0 + 33.868_8).abs() < 1e-9);
    assert!((center.1 + 151.209_3).abs() < 1e-9);
}

#[test]
fn lat_without_lon_is_rejected() {
    let result = Cli::try_parse_from(["ecosort-cli", "dropoffs", "--lat", "28.6"]);
    assert!(result.is_err());
}

#[test]
fn lon_without_lat_is_rejected() {
    let result = Cli::try_parse_from(["ecosort-cli", "dropoffs", "--lon", "77.2"]);
    assert!(result.is_err());
}

#[test]
fn parses_dropoffs_filter_radius_and_json() {
    let cli = Cli::try_parse_from([
        "ecosort-cli",
        "dropoffs",
        "--filter",
        "Hazardous",
        "--radius",
        "2500",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Dropoffs {
            filter: Some(ref f),
            radius: Some(2500),
            json: true,
            ..
        }) if f == "Hazardous"
    ));
}

#[test]
fn parses_navigate_rank() {
    let cli = Cli::try_parse_from(["ecosort-cli", "dropoffs", "--navigate", "2"])
        .expect("expected valid cli args");

    let Some(Commands::Dropoffs { navigate, .. }) = cli.command else {
        panic!("expected dropoffs command");
    };
    assert_eq!(navigate.map(NonZeroUsize::get), Some(2));
}

#[test]
fn navigate_rank_zero_is_rejected() {
    let result = Cli::try_parse_from(["ecosort-cli", "dropoffs", "--navigate", "0"]);
    assert!(result.is_err());
}

#[test]
fn parses_filters_command() {
    let cli = Cli::try_parse_from(["ecosort-cli", "filters"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Filters)));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
