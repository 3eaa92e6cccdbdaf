use std::fs;

use tracing_subscriber::EnvFilter;

mod hash_statistics;

const SEED: i64 = 42;
const NAME_COUNT: usize = 100;
const REPORT_FILE: &str = "hash_statistics.bin";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Hash table experiment: good vs bad vs xxh3 hashing\n");
    let report = hash_statistics::run(SEED, NAME_COUNT);

    let mut file = match fs::File::create(REPORT_FILE) {
        Ok(f) => f,
        Err(why) => panic!("Unable to write to report file {}, reason {}", REPORT_FILE, why),
    };
    bincode::serialize_into(&mut file, &report).expect("Unable to serialize experiment report");
    println!("\nReport saved to {REPORT_FILE}");
}
