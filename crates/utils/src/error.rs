use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use strum::{Display, EnumIter};

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, EnumIter, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ChirpErrorType {
  NotFound,
  /// A (post, person) like pair already exists, the caller should treat the
  /// post as already liked.
  AlreadyLikedPost,
  /// A (comment, person) like pair already exists.
  AlreadyLikedComment,
  /// The person name is taken.
  PersonAlreadyExists,
  Unknown(String),
}

cfg_if! {
  if #[cfg(feature = "full")] {

    use std::{fmt, backtrace::Backtrace};
    pub type ChirpResult<T> = Result<T, ChirpError>;

    pub struct ChirpError {
      pub error_type: ChirpErrorType,
      pub inner: anyhow::Error,
      pub context: Backtrace,
    }

    impl<T> From<T> for ChirpError
    where
      T: Into<anyhow::Error>,
    {
      fn from(t: T) -> Self {
        let cause = t.into();
        let error_type = match cause.downcast_ref::<diesel::result::Error>() {
          Some(&diesel::NotFound) => ChirpErrorType::NotFound,
          _ => ChirpErrorType::Unknown(format!("{}", &cause)),
        };
        ChirpError {
          error_type,
          inner: cause,
          context: Backtrace::capture(),
        }
      }
    }

    impl Debug for ChirpError {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChirpError")
         .field("message", &self.error_type)
         .field("inner", &self.inner)
         .field("context", &self.context)
         .finish()
      }
    }

    impl fmt::Display for ChirpError {
      fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: ", &self.error_type)?;
        writeln!(f, "{}", self.inner)?;
        fmt::Display::fmt(&self.context, f)
      }
    }

    impl From<ChirpErrorType> for ChirpError {
      fn from(error_type: ChirpErrorType) -> Self {
        let inner = anyhow::anyhow!("{}", error_type);
        ChirpError {
          error_type,
          inner,
          context: Backtrace::capture(),
        }
      }
    }

    pub trait ChirpErrorExt<T, E: Into<anyhow::Error>> {
      fn with_chirp_type(self, error_type: ChirpErrorType) -> ChirpResult<T>;
    }

    impl<T, E: Into<anyhow::Error>> ChirpErrorExt<T, E> for Result<T, E> {
      fn with_chirp_type(self, error_type: ChirpErrorType) -> ChirpResult<T> {
        self.map_err(|error| ChirpError {
          error_type,
          inner: error.into(),
          context: Backtrace::capture(),
        })
      }
    }

    #[cfg(test)]
    mod tests {
      use super::*;
      use pretty_assertions::assert_eq;

      #[test]
      fn test_convert_diesel_errors() {
        let not_found_error = ChirpError::from(diesel::NotFound);
        assert_eq!(ChirpErrorType::NotFound, not_found_error.error_type);

        let other_error = ChirpError::from(diesel::result::Error::NotInTransaction);
        assert!(matches!(other_error.error_type, ChirpErrorType::Unknown{..}));
      }

      #[test]
      fn test_serializes_error_type() {
        let json = serde_json::to_string(&ChirpErrorType::AlreadyLikedPost)
          .unwrap_or_default();
        assert_eq!(&json, "{\"error\":\"already_liked_post\"}");
      }
    }
  }
}
