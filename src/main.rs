use std::fs::File;
use std::io;

use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use mini_snake::app::App;

// The alternate screen owns stdout while the game runs, so logs go to a file.
const LOG_FILE: &str = "mini-snake.log";

fn main() -> io::Result<()> {
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .expect("logger is initialized exactly once");
    info!("starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut app = App::new()?;
    app.run()
}
