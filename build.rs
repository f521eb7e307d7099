use std::{env, fs, path::PathBuf};

// Places settings.json next to the built binary so it runs from target/.
fn main() {
    println!("cargo:rerun-if-changed=settings.json");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let Some(target_dir) = out_dir.ancestors().nth(3) else {
        return;
    };

    fs::copy("settings.json", target_dir.join("settings.json"))
        .expect("Failed to copy settings.json");
}
