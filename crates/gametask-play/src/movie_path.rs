use std::path::{Path, PathBuf};

use gametask_types::TaskError;

pub const MOVIE_EXTENSION: &str = "bk2";

/// `{base}_{game}_{state}_{NNN}.bk2`; a missing state is written as `None`.
pub fn movie_file_name(base: &str, game: &str, state: Option<&str>, index: u32) -> String {
    format!(
        "{base}_{game}_{}_{index:03}.{MOVIE_EXTENSION}",
        state.unwrap_or("None")
    )
}

/// First movie path in `dir` whose index is not taken yet.
///
/// Indices are tried from 0 upwards; gaps are reused.
pub fn next_movie_path(
    dir: &Path,
    base: &str,
    game: &str,
    state: Option<&str>,
) -> Result<PathBuf, TaskError> {
    let mut index = 0u32;
    loop {
        let path = dir.join(movie_file_name(base, game, state, index));
        let taken = path.try_exists().map_err(|source| TaskError::Io {
            path: path.clone(),
            source,
        })?;
        if !taken {
            return Ok(path);
        }
        index += 1;
    }
}
