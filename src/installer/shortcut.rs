//! Desktop shortcut creation.
//!
//! On Windows (with the `win` feature) a `.lnk` is written through the
//! shell COM interfaces; elsewhere a `.desktop` entry is placed on the
//! user's Desktop.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

pub fn create_desktop_shortcut(target: &Path, link_name: &str) -> Result<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(all(windows, feature = "win"))] {
            windows_shortcut(target, link_name)
        } else {
            desktop_entry(target, link_name)
        }
    }
}

fn desktop_dir() -> Result<PathBuf> {
    let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let home = std::env::var(home_var)
        .map_err(|_| anyhow!("{home_var} is not set; cannot find the desktop"))?;
    Ok(PathBuf::from(home).join("Desktop"))
}

#[cfg(all(windows, feature = "win"))]
fn windows_shortcut(target: &Path, link_name: &str) -> Result<PathBuf> {
    use windows::{
        core::{Interface, HSTRING, PCWSTR},
        Win32::System::Com::{
            CoCreateInstance, CoInitializeEx, CoUninitialize, StructuredStorage::IPersistFile,
            CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED,
        },
        Win32::UI::Shell::{IShellLinkW, ShellLink},
    };

    let link_path = desktop_dir()?.join(format!("{link_name}.lnk"));
    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
        let saved = (|| -> Result<()> {
            let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)?;
            let target_text = HSTRING::from(target.as_os_str());
            link.SetPath(PCWSTR(target_text.as_ptr()))?;
            if let Some(working_dir) = target.parent() {
                let dir_text = HSTRING::from(working_dir.as_os_str());
                link.SetWorkingDirectory(PCWSTR(dir_text.as_ptr()))?;
            }
            let persist: IPersistFile = link.cast()?;
            let link_text = HSTRING::from(link_path.as_os_str());
            persist.Save(PCWSTR(link_text.as_ptr()), true)?;
            Ok(())
        })();
        CoUninitialize();
        saved?;
    }
    Ok(link_path)
}

#[cfg(not(all(windows, feature = "win")))]
fn desktop_entry(target: &Path, link_name: &str) -> Result<PathBuf> {
    let desktop = desktop_dir()?;
    std::fs::create_dir_all(&desktop)?;
    let link_path = desktop.join(format!("{link_name}.desktop"));
    let entry = format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={link_name}\n\
         Exec={}\n\
         Terminal=true\n",
        target.display()
    );
    std::fs::write(&link_path, entry)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&link_path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(link_path)
}

#[cfg(all(test, not(all(windows, feature = "win"))))]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn desktop_entry_points_at_the_target() -> Result<()> {
        let home = tempdir()?;
        std::env::set_var("HOME", home.path());

        let link = create_desktop_shortcut(Path::new("/opt/OnTrack/ontrack"), "OnTrack")?;
        assert!(link.ends_with("Desktop/OnTrack.desktop"));
        let entry = std::fs::read_to_string(&link)?;
        assert!(entry.contains("Exec=/opt/OnTrack/ontrack"));
        assert!(entry.contains("Name=OnTrack"));
        Ok(())
    }
}
