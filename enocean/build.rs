use std::collections::HashMap;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;

fn main() {
    // (Variable, Type, Default value)
    let mut configs: HashMap<&str, (&str, &str)> = HashMap::from([
        ("SEND_LOCK_TIMEOUT", ("Duration", "Duration::from_ms(2_000)")),
        ("RESPONSE_TIMEOUT", ("Duration", "Duration::from_ms(500)")),
        (
            "DEFAULT_LEARNING_TIMEOUT",
            ("Duration", "Duration::from_secs(60)"),
        ),
        ("RX_BUFFER_LEN", ("usize", "512")),
        ("TX_BUFFER_LEN", ("usize", "64")),
        // Must be a power of two
        ("MAX_EEP_PARSERS", ("usize", "32")),
        ("MAX_KNOWN_DEVICES", ("usize", "32")),
        ("MAX_PENDING_TEACH_INS", ("usize", "4")),
    ]);

    // Make sure we get rerun if needed
    println!("cargo:rerun-if-changed=build.rs");
    for name in configs.keys() {
        println!("cargo:rerun-if-env-changed=ENOCEAN_{name}");
    }

    let mut data = String::new();
    writeln!(data, "use crate::time::Duration;").unwrap();

    for (var, value) in std::env::vars() {
        if let Some(name) = var.strip_prefix("ENOCEAN_") {
            // discard from hashmap as a way of consuming the setting
            let Some((_, (ty, _))) = configs.remove_entry(name) else {
                panic!("Wrong configuration name {name}");
            };

            writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
        }
    }

    // Take the remaining configs and write the default value to the file
    for (name, (ty, value)) in configs.iter() {
        writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let out_file = out_dir.join("config.rs");
    std::fs::write(out_file, data).unwrap();
}
