//! Embeds the build date and, outside `release` builds, the git commit.

use std::error::Error;

use vergen_gitcl::{BuildBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;
    let mut emitter = Emitter::default();
    emitter.add_instructions(&build)?;

    // Release builds get a version string without the commit hash
    if cfg!(not(feature = "release")) {
        let git = GitclBuilder::default().sha(true).build()?;
        emitter.add_instructions(&git)?;
    }

    emitter.emit()?;
    Ok(())
}
