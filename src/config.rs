//! Export configuration.

use std::path::{Path, PathBuf};

/// Default location of the about page relative to the content root.
pub const DEFAULT_ABOUT_PAGE: &str = "_pages/about.md";
/// Default experience directory relative to the content root.
pub const DEFAULT_EXPERIENCE_DIR: &str = "_experience";
/// Default awards directory relative to the content root.
pub const DEFAULT_AWARDS_DIR: &str = "_awards";
/// Default publications directory relative to the content root.
pub const DEFAULT_PUBLICATIONS_DIR: &str = "_publications";
/// Default PDF output relative to the content root.
pub const DEFAULT_OUTPUT: &str = "files/resume.pdf";
/// Default header photo relative to the content root.
pub const DEFAULT_PHOTO: &str = "images/bio-photo.jpg";
/// Default cap on the number of rendered publications.
pub const DEFAULT_MAX_PUBLICATIONS: usize = 100;

/// Locations and limits for one export run.
///
/// Content locations are resolved against the content root unless they are absolute. The output
/// and photo paths are used as given; their defaults live under the content root.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    root: PathBuf,
    about_page: PathBuf,
    experience_dir: PathBuf,
    awards_dir: PathBuf,
    publications_dir: PathBuf,
    output: PathBuf,
    photo: Option<PathBuf>,
    max_publications: Option<usize>,
    page_numbers: bool,
}

impl ExportConfig {
    /// Creates a configuration with the default site layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            about_page: PathBuf::from(DEFAULT_ABOUT_PAGE),
            experience_dir: PathBuf::from(DEFAULT_EXPERIENCE_DIR),
            awards_dir: PathBuf::from(DEFAULT_AWARDS_DIR),
            publications_dir: PathBuf::from(DEFAULT_PUBLICATIONS_DIR),
            output: root.join(DEFAULT_OUTPUT),
            photo: Some(root.join(DEFAULT_PHOTO)),
            max_publications: Some(DEFAULT_MAX_PUBLICATIONS),
            page_numbers: false,
            root,
        }
    }

    /// Sets the about page location.
    pub fn with_about_page(mut self, path: impl Into<PathBuf>) -> Self {
        self.about_page = path.into();
        self
    }

    /// Sets the experience directory.
    pub fn with_experience_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.experience_dir = path.into();
        self
    }

    /// Sets the awards directory.
    pub fn with_awards_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.awards_dir = path.into();
        self
    }

    /// Sets the publications directory.
    pub fn with_publications_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.publications_dir = path.into();
        self
    }

    /// Sets the output file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Sets or clears the header photo.
    pub fn with_photo(mut self, path: impl Into<Option<PathBuf>>) -> Self {
        self.photo = path.into();
        self
    }

    /// Caps the number of publications; `None` keeps all of them.
    pub fn with_max_publications(mut self, limit: impl Into<Option<usize>>) -> Self {
        self.max_publications = limit.into();
        self
    }

    /// Enables a page number footer on every page.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Returns the resolved about page path.
    pub fn about_page(&self) -> PathBuf {
        self.resolve(&self.about_page)
    }

    /// Returns the resolved experience directory.
    pub fn experience_dir(&self) -> PathBuf {
        self.resolve(&self.experience_dir)
    }

    /// Returns the resolved awards directory.
    pub fn awards_dir(&self) -> PathBuf {
        self.resolve(&self.awards_dir)
    }

    /// Returns the resolved publications directory.
    pub fn publications_dir(&self) -> PathBuf {
        self.resolve(&self.publications_dir)
    }

    /// Returns the output file.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the header photo, if one is configured.
    pub fn photo(&self) -> Option<&Path> {
        self.photo.as_deref()
    }

    /// Returns the publication cap.
    pub fn max_publications(&self) -> Option<usize> {
        self.max_publications
    }

    /// Returns whether pages carry a page number footer.
    pub fn page_numbers(&self) -> bool {
        self.page_numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_site_layout() {
        let config = ExportConfig::new("/site");
        assert_eq!(config.about_page(), Path::new("/site/_pages/about.md"));
        assert_eq!(config.experience_dir(), Path::new("/site/_experience"));
        assert_eq!(config.awards_dir(), Path::new("/site/_awards"));
        assert_eq!(config.publications_dir(), Path::new("/site/_publications"));
        assert_eq!(config.output(), Path::new("/site/files/resume.pdf"));
        assert_eq!(config.photo(), Some(Path::new("/site/images/bio-photo.jpg")));
        assert_eq!(config.max_publications(), Some(DEFAULT_MAX_PUBLICATIONS));
    }

    #[test]
    fn absolute_content_paths_are_kept() {
        let config = ExportConfig::new("/site").with_awards_dir("/elsewhere/awards");
        assert_eq!(config.awards_dir(), Path::new("/elsewhere/awards"));
    }

    #[test]
    fn photo_can_be_cleared() {
        let config = ExportConfig::new("/site").with_photo(None);
        assert_eq!(config.photo(), None);
    }
}
