use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompoError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("サーバエラー: {0}")]
    Server(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] monster_compo_common::Error),
}

impl CompoError {
    /// 呼び出し側の入力に起因するエラーか
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CompoError::InvalidInput(_) | CompoError::Common(monster_compo_common::Error::InvalidInput(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, CompoError>;
