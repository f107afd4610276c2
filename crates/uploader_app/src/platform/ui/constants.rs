pub const TITLE: &str = "Upload image";
pub const EMPTY_PROMPT: &str = "Click to choose an image";
pub const EMPTY_HINT: &str = "or drag and drop (JPG, PNG, WEBP)";
pub const CLEAR_LABEL: &str = "Clear";
pub const CLEAR_TIP: &str = "Tip: click \"Clear\" and then choose a new image.";
pub const RESULT_HEADING: &str = "Prediction";
pub const ERROR_HEADING: &str = "Error";
pub const PROMPT: &str = "> ";
