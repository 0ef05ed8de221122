use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use data_encoding::HEXLOWER;
use simple_logger::SimpleLogger;

pub fn setup() -> PathBuf {
    let _ = SimpleLogger::new().init();

    let work_dir_path = PathBuf::from_str("./target/partitions/").unwrap();
    if !work_dir_path.exists() {
        fs::create_dir_all(&work_dir_path).unwrap_or_else(|_| {
            panic!("Failed to create partition directory: {:?}", work_dir_path)
        });
    }
    work_dir_path
}

#[allow(dead_code)]
pub fn random_token() -> String {
    HEXLOWER.encode(&rand::random::<[u8; 16]>())
}
