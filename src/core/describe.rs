use serde_json::Value;

pub const DISCLAIMER: &str = "Condition not verified. See photos for details.";

const DESCRIPTION_FIELDS: [&str; 3] = ["description", "long_description", "subtitle"];

/// 寬鬆的數值解析：接受數字或含 `$`、`,` 的字串，失敗一律視為 `0.0`
pub fn safe_float(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_price(s),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Maximum of every `list_price` and `price` across all offers.
pub fn max_offer_price(offers: &[Value]) -> f64 {
    offers
        .iter()
        .flat_map(|offer| [offer.get("list_price"), offer.get("price")])
        .map(safe_float)
        .fold(0.0, f64::max)
}

/// Trimmed string field, empty when absent or not a string.
pub fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub fn upstream_description(item: &Value) -> Option<String> {
    DESCRIPTION_FIELDS
        .iter()
        .map(|key| str_field(item, key))
        .find(|text| !text.is_empty())
}

pub fn synthesize_description(brand: &str, title: &str, retail: f64) -> String {
    let brand = brand.trim();
    let title = title.trim();
    let mut parts: Vec<String> = Vec::new();

    if !brand.is_empty() {
        parts.push(brand.to_string());
    }
    if !title.is_empty() && title.to_lowercase() != brand.to_lowercase() {
        parts.push(title.to_string());
    }
    if retail > 0.0 {
        parts.push(format!("Approx. retail: ${:.2}.", retail));
    }
    parts.push(DISCLAIMER.to_string());

    parts.join(" ")
}

/// 優先使用上游描述，否則由品牌、標題與價格組出一段描述
pub fn describe(item: &Value, brand: &str, title: &str, retail: f64) -> String {
    upstream_description(item).unwrap_or_else(|| synthesize_description(brand, title, retail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_float() {
        assert_eq!(safe_float(Some(&json!("$1,299.00"))), 1299.0);
        assert_eq!(safe_float(Some(&json!("abc"))), 0.0);
        assert_eq!(safe_float(Some(&Value::Null)), 0.0);
        assert_eq!(safe_float(None), 0.0);
        assert_eq!(safe_float(Some(&json!(12.5))), 12.5);
        assert_eq!(safe_float(Some(&json!(" 7 "))), 7.0);
        assert_eq!(safe_float(Some(&json!("inf"))), 0.0);
    }

    #[test]
    fn test_max_offer_price_takes_maximum() {
        let offers = vec![json!({"price": 10}), json!({"list_price": 25}), json!({"price": 5})];
        assert_eq!(max_offer_price(&offers), 25.0);
    }

    #[test]
    fn test_max_offer_price_handles_junk() {
        let offers = vec![json!({"price": "", "list_price": "n/a"}), json!({})];
        assert_eq!(max_offer_price(&offers), 0.0);
        assert_eq!(max_offer_price(&[]), 0.0);
    }

    #[test]
    fn test_duplicate_title_and_zero_retail_omitted() {
        assert_eq!(
            synthesize_description("Dyson", "Dyson", 0.0),
            "Dyson Condition not verified. See photos for details."
        );
        assert_eq!(
            synthesize_description("Dyson", "dyson", 0.0),
            "Dyson Condition not verified. See photos for details."
        );
    }

    #[test]
    fn test_duplicate_title_compared_with_unicode_case() {
        assert_eq!(
            synthesize_description("émile henry", "ÉMILE HENRY", 0.0),
            "émile henry Condition not verified. See photos for details."
        );
    }

    #[test]
    fn test_full_synthesized_description() {
        assert_eq!(
            synthesize_description("Dyson", "V8 Cordless Vacuum", 349.999),
            "Dyson V8 Cordless Vacuum Approx. retail: $350.00. Condition not verified. See photos for details."
        );
        assert_eq!(synthesize_description("", "", 0.0), DISCLAIMER);
    }

    #[test]
    fn test_upstream_description_order() {
        let item = json!({"description": "  ", "long_description": "Long text", "subtitle": "Sub"});
        assert_eq!(describe(&item, "B", "T", 1.0), "Long text");

        let item = json!({"subtitle": "Only subtitle"});
        assert_eq!(describe(&item, "B", "T", 1.0), "Only subtitle");

        let item = json!({"description": "Primary", "subtitle": "Sub"});
        assert_eq!(describe(&item, "B", "T", 1.0), "Primary");
    }
}
