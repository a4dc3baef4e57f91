use igc_reader::IgcSource;
use tracks::{resolver::TrackInfoResolver, store::TrackStore};
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // config
    let config = WebConfig::from_env()
        .expect("expected a numeric PORT and TRACK_FETCH_TIMEOUT_SECS in env.");

    // tracks
    let source =
        IgcSource::new(config.fetch_timeout).expect("could not create http client.");
    let resolver =
        TrackInfoResolver::new(TrackStore::new(), source, config.fetch_timeout);

    // web server
    if let Err(why) = start_web_server(&config, WebState::new(resolver)).await {
        log::error!("web server stopped: {}", why);
    }
}
