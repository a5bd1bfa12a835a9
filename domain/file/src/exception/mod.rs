use url::Url;

pub type FileResult<T> = Result<T, FileException>;

#[derive(Debug, thiserror::Error)]
pub enum FileException {
    #[error("The file handle is not mounted in any record store.")]
    NotMounted,

    #[error("Resolving metadata for url: {url} failed: {source}")]
    MetadataFetch {
        url: Url,
        #[source]
        source: anyhow::Error,
    },

    #[error("File internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for FileException {
    fn from(e: anyhow::Error) -> Self {
        FileException::InternalError { source: e }
    }
}
