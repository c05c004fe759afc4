use thiserror::Error;

/// Ошибки клиента, который запрашивает занятые места сеанса.
#[derive(Debug, Error)]
pub enum SeatError {
    /// Сеть недоступна, таймаут или тело ответа не разобралось как JSON.
    #[error("booked seats request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Сервер ответил не-2xx статусом.
    #[error("booked seats endpoint returned status {0}")]
    Status(u16),
}

/// Ошибки загрузки данных о сеансах на стороне сервера.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read shows file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse shows file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
