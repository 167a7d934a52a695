use crate::error::{SvqError, SvqResult};
use log;
use std::{path::Path, sync::Once};

pub type Result<T> = SvqResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: SvqError) -> ! {
    log::error!("{err}");
    std::process::exit(err.exit_code());
}

pub fn try_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::svq_error!(
            "Path/File does not exist: {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_exists_missing_path() {
        let result = try_exists(Path::new("/definitely/not/a/real/path"));
        assert!(result.is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SvqError::usage("bad region").exit_code(), 64);
        assert_eq!(crate::svq_error!("anything else").exit_code(), 1);
    }
}
