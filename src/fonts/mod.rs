//! Font loading utilities for the `resume_pdf` crate.
//!
//! The bundled Roboto family is searched for in, in order:
//!
//! 1. the directory named by `RESUME_FONTS_DIR`
//! 2. `assets/fonts` next to the running executable
//! 3. `assets/fonts` under the crate manifest directory
//!
//! When none of them holds all four faces, a system family is tried instead: DejaVu Sans on
//! Linux, Arial on Windows. `RESUME_SYSTEM_FONTS_DIR` pins the directory searched for the system
//! family.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

const FONTS_DIR_VAR: &str = "RESUME_FONTS_DIR";
const SYSTEM_FONTS_DIR_VAR: &str = "RESUME_SYSTEM_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

struct SystemFontFiles {
    family: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
    directories: &'static [&'static str],
}

const SYSTEM_FALLBACKS: &[SystemFontFiles] = &[
    SystemFontFiles {
        family: "DejaVu Sans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ],
    },
    SystemFontFiles {
        family: "Arial",
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
        directories: &[],
    },
];

/// Returns the `assets/fonts` directory under the crate manifest.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_VAR) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate bundled font directory. Checked: {}. Set {} to a directory holding the Roboto faces.",
            summary, FONTS_DIR_VAR
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_bundled_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;
    debug!("Loading {} fonts from {}", DEFAULT_FONT_FAMILY_NAME, directory.display());

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load default font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_font_directories(files: &SystemFontFiles) -> Vec<PathBuf> {
    if let Some(path) = env_path(SYSTEM_FONTS_DIR_VAR) {
        return vec![path];
    }

    let directories = files.directories.iter().map(PathBuf::from);
    #[cfg(windows)]
    let directories = directories.chain(windows_font_directories());
    directories.collect()
}

#[cfg(windows)]
fn windows_font_directories() -> Vec<PathBuf> {
    ["WINDIR", "SystemRoot"]
        .iter()
        .filter_map(|var| env_path(var))
        .map(|root| root.join("Fonts"))
        .collect()
}

fn load_system_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_system_family(files: &SystemFontFiles) -> Result<FontFamily<FontData>, Error> {
    let directory = system_font_directories(files)
        .into_iter()
        .find(|candidate| candidate.join(files.regular).is_file())
        .ok_or_else(|| {
            Error::new(
                format!("No directory holds the '{}' fallback family", files.family),
                io::Error::new(io::ErrorKind::NotFound, "fallback fonts directory not found"),
            )
        })?;

    Ok(FontFamily {
        regular: load_system_font(&directory, files.regular, "regular")?,
        bold: load_system_font(&directory, files.bold, "bold")?,
        italic: load_system_font(&directory, files.italic, "italic")?,
        bold_italic: load_system_font(&directory, files.bold_italic, "bold italic")?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

fn system_fallback_family(bundled_err: &Error) -> Result<FontFamily<FontData>, Error> {
    let mut failures = Vec::new();
    for files in SYSTEM_FALLBACKS {
        match load_system_family(files) {
            Ok(family) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to system '{}' family.",
                    bundled_err, files.family
                );
                return Ok(family);
            }
            Err(err) => failures.push(err.to_string()),
        }
    }

    warn!(
        "Bundled fonts unavailable ({}); system fallbacks failed: {}",
        bundled_err,
        failures.join("; ")
    );
    Err(Error::new(
        format!(
            "Bundled fonts unavailable and system fallbacks failed: {}",
            failures.join("; ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
    ))
}

/// Returns the bundled Roboto font family if available and otherwise the first system family
/// that can be loaded.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_bundled_font_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => system_fallback_family(&err),
        Err(err) => Err(err),
    }
}

/// Indicates whether some usable font family, bundled or system, can be found on disk.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
        || SYSTEM_FALLBACKS.iter().any(|files| {
            system_font_directories(files)
                .iter()
                .any(|directory| {
                    [files.regular, files.bold, files.italic, files.bold_italic]
                        .iter()
                        .all(|file| directory.join(file).is_file())
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_reported_as_not_found() {
        let err = Error::new(
            "missing",
            io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
        );
        assert!(fonts_missing(&err));
    }

    #[test]
    fn manifest_directory_is_always_a_candidate() {
        assert!(font_directory_candidates().contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn missing_files_are_listed() {
        let missing = missing_font_files(Path::new("/__resume_pdf_no_fonts__"));
        assert_eq!(missing.len(), FONT_FILES.len());
    }
}
