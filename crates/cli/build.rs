//! Build script for giks-cli.
//!
//! Emits build, rustc and git metadata through vergen; `giks version`
//! reads them with `option_env!`.

use vergen_git2::{Emitter, Git2Builder};

fn main() -> anyhow::Result<()> {
    let build = vergen::BuildBuilder::all_build()?;
    let rustc = vergen::RustcBuilder::all_rustc()?;

    vergen::Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&rustc)?
        .emit()?;

    // Outside a git checkout vergen only warns
    let git = Git2Builder::all_git()?;
    Emitter::default().add_instructions(&git)?.emit()?;

    Ok(())
}
