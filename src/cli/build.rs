//! Le build script.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::str;


/// File in the $OUT_DIR where the current revision is written.
const REVISION_FILE: &str = "revision";


fn main() {
    // Obtain Git SHA to pass it further to the crate code via ad-hoc file.
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by Cargo");
    let rev_path = Path::new(&out_dir).join(REVISION_FILE);
    let mut revision_file = File::create(&rev_path)
        .unwrap_or_else(|e| panic!("cannot create {}: {}", rev_path.display(), e));

    // The file is always created (possibly empty) since the crate includes it.
    match git_head_sha() {
        Ok(rev) => revision_file.write_all(rev.as_bytes())
            .unwrap_or_else(|e| panic!("cannot write {}: {}", rev_path.display(), e)),
        Err(e) => println!("cargo:warning=Failed to obtain current Git SHA: {}", e),
    };
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}

fn git_head_sha() -> Result<String, Box<dyn Error>> {
    let mut cmd = Command::new("git");
    cmd.args(&["rev-parse", "--short", "HEAD"]);

    let output = cmd.output()?;
    if !output.status.success() {
        return Err(format!("git exited with {}", output.status).into());
    }
    let sha = str::from_utf8(&output.stdout[..])?.trim().to_owned();
    Ok(sha)
}
