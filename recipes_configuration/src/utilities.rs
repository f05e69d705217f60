use std::env::current_dir;
use std::io;
use std::path::{Path, PathBuf};


/// Returns the default configuration filepath, which is at
/// `{current directory}/data/configuration.toml`.
pub(crate) fn get_default_configuration_file_path() -> Result<PathBuf, io::Error> {
    let mut configuration_filepath = current_dir()?;
    configuration_filepath.push("data/configuration.toml");

    Ok(configuration_filepath)
}

/// Joins a relative `path` onto `base_directory`, leaving absolute paths alone.
///
/// Paths that already exist are canonicalized (without UNC prefixes on Windows).
pub(crate) fn make_path_absolute(base_directory: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);

    let absolute_path = if path.is_absolute() {
        path
    } else {
        base_directory.join(path)
    };

    dunce::canonicalize(&absolute_path).unwrap_or(absolute_path)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative_paths_are_joined_onto_base_directory() {
        let resolved = make_path_absolute(
            Path::new("/nonexistent-recipes-directory"),
            "data/logs",
        );

        assert_eq!(
            resolved,
            PathBuf::from("/nonexistent-recipes-directory/data/logs")
        );
    }

    #[test]
    fn absolute_paths_are_not_rebased() {
        let absolute_path = std::env::temp_dir()
            .join("nonexistent-recipes-directory")
            .to_string_lossy()
            .to_string();

        let resolved = make_path_absolute(Path::new("/somewhere/else"), &absolute_path);

        assert_eq!(resolved, PathBuf::from(&absolute_path));
    }
}
