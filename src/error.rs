use thiserror::Error;

#[derive(Error, Debug)]
pub enum KenshinError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応の文字コードです: {0}")]
    UnsupportedEncoding(String),

    #[error("入力ファイルの読み込みに失敗: {0}")]
    InputParse(String),

    #[error("CSV書き込みエラー: {0}")]
    CsvWrite(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("出力フォルダを作成できません: {0}")]
    OutputDir(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] kenshin_common::Error),
}

pub type Result<T> = std::result::Result<T, KenshinError>;
