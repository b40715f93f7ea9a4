use crate::domain::model::ErrorKind;

/// 將輸入條碼整理成依序嘗試的候選清單
///
/// A 13-digit code with a leading `0` is also tried as its trailing 12 digits,
/// since some providers only index UPC-A.
pub fn candidates(raw: &str) -> Result<Vec<String>, ErrorKind> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(ErrorKind::MissingUpc);
    }

    let mut list = vec![code.to_string()];
    if code.len() == 13 && code.starts_with('0') {
        list.push(code[1..].to_string());
    }
    Ok(list)
}

/// Strict check: ASCII digits only, UPC-A or EAN-13 length.
pub fn validate_strict(code: &str) -> Result<(), ErrorKind> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ErrorKind::MissingUpc);
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) || !matches!(code.len(), 12 | 13) {
        return Err(ErrorKind::InvalidUpc);
    }
    Ok(())
}
