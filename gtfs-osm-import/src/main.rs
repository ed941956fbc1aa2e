use clap::Parser;
use gtfs_osm_import::app::GtfsOsmApp;

fn main() {
    env_logger::init();
    let args = GtfsOsmApp::parse();
    if let Err(e) = args.run() {
        log::error!("gtfs_osm failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
