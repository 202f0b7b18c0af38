use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Copy the sample config from /src to the output directory, next to our
// resulting executable, so the binary can run straight out of target/.
pub fn main() {
    let manifest_dir = match env::var_os("CARGO_MANIFEST_DIR") {
        Some(dir) => dir,
        None => return,
    };
    let output_dir = match env::var_os("OUT_DIR") {
        Some(dir) => dir,
        None => return,
    };

    // OUT_DIR sits three levels below the directory the executable lands in.
    let output_dir = PathBuf::from(output_dir);
    let exe_dir = match output_dir
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
    {
        Some(dir) => dir.to_path_buf(),
        None => return,
    };

    let config_file = Path::new(&manifest_dir).join("src").join("config.toml");
    let dest_file = exe_dir.join("config.toml");
    match fs::copy(&config_file, &dest_file) {
        Ok(_) => println!(
            "Copied config file successfully from {:?} to {:?}",
            config_file, dest_file
        ),
        Err(e) => println!(
            "Failed to copy config file from {:?} to {:?}: {:?}",
            config_file, dest_file, e
        ),
    }
}
