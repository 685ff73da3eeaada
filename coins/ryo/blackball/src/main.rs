#[cfg(feature = "binaries")]
fn network_db_path(path: String) -> String {
  let network = ryo_env::var("NETWORK").unwrap_or_else(|| "mainnet".to_string());
  match network.to_lowercase().as_str() {
    "mainnet" => path,
    "testnet" => format!("{path}/testnet"),
    "stagenet" => format!("{path}/stagenet"),
    _ => panic!("unrecognized NETWORK {network}"),
  }
}

#[cfg(feature = "binaries")]
fn main() {
  use ryo_blackball::{ChainFile, blackball};

  if std::env::var("RUST_LOG").is_err() {
    std::env::set_var("RUST_LOG", ryo_env::var("RUST_LOG").unwrap_or_else(|| "info".to_string()));
  }
  env_logger::init();

  log::info!("starting ryo-blackball...");

  let inputs = std::env::args().skip(1).collect::<Vec<_>>();
  if inputs.is_empty() {
    log::error!("no chain files were specified");
    std::process::exit(1);
  }

  let db_path = network_db_path(
    ryo_env::var("BLACKBALL_DB_PATH").expect("path to the blackball DB wasn't specified"),
  );
  std::fs::create_dir_all(&db_path).expect("couldn't create the blackball DB directory");
  let db = ryo_db::new_parity_db(&db_path);

  let mut sources = vec![];
  for input in &inputs {
    // Paths may have been specified with a trailing separator
    let input = input.trim_end_matches(['/', '\\']);
    log::info!("loading chain from {input}");
    match ChainFile::open(input) {
      Ok(source) => sources.push(source),
      Err(e) => {
        log::error!("couldn't open chain {input}: {e}");
        std::process::exit(1);
      }
    }
  }

  match blackball(db, &sources, ryo_env::flag("RCT_ONLY")) {
    Ok(report) => {
      log::info!("blackballed {} outputs", report.spent.len());
      if report.disjoint_rings != 0 {
        log::warn!("{} key images had disjoint rings", report.disjoint_rings);
      }
      for index in report.failed_sources {
        log::warn!("chain {} was only partially scanned", sources[index].path().display());
      }
    }
    Err(e) => {
      log::error!("couldn't blackball outputs: {e}");
      std::process::exit(1);
    }
  }
}

#[cfg(not(feature = "binaries"))]
fn main() {
  panic!("To run binaries, please build with `--feature binaries`.");
}
