use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use ontrack::cli::confirm;
use ontrack::installer::{install, InstallOptions, APP_FOLDER};
use ontrack::utils::{
    dir::create_application_default_path,
    logging::{enable_logging, INSTALLER_PREFIX},
};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "OnTrack Installer", version)]
#[command(about = "Unpacks the OnTrack application folder and creates a desktop shortcut")]
struct InstallerArgs {
    #[arg(
        long,
        help = "Distribution zip archive. Defaults to OnTrack.zip beside the installer"
    )]
    archive: Option<PathBuf>,
    #[arg(long, help = "Installation directory. Defaults to your home directory")]
    dest: Option<PathBuf>,
    #[arg(long, help = "Skip the confirmation prompt")]
    yes: bool,
    #[arg(long, help = "Do not create a desktop shortcut")]
    no_shortcut: bool,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

fn main() -> Result<()> {
    let args = InstallerArgs::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        INSTALLER_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    let archive = match args.archive {
        Some(path) => path,
        None => {
            let mut path = std::env::current_exe()?;
            path.set_file_name("OnTrack.zip");
            path
        }
    };
    let dest = match args.dest {
        Some(path) => path,
        None => {
            let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
            std::env::var(home_var)
                .map(PathBuf::from)
                .map_err(|_| anyhow!("{home_var} is not set; pass --dest"))?
        }
    };

    println!("The OnTrack app requires 100 MB of space.");
    println!("archive: {}", archive.display());
    println!("install into: {}", dest.display());
    if !confirm(
        &format!("Install {APP_FOLDER} into the selected directory?"),
        true,
        args.yes,
    )? {
        println!("installation cancelled");
        return Ok(());
    }

    let summary = install(&InstallOptions {
        archive,
        dest,
        make_shortcut: !args.no_shortcut,
    })?;

    println!(
        "installed {} files into {}",
        summary.extracted_files,
        summary.app_dir.display()
    );
    if let Some(link) = summary.shortcut {
        println!("a shortcut has been added to your desktop: {}", link.display());
    }
    println!("Installation Complete!");
    Ok(())
}
