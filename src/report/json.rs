use crate::models::DependencyInfo;

/// Compact JSON followed by a newline.
pub fn render(info: &DependencyInfo) -> serde_json::Result<String> {
    let mut out = serde_json::to_string(info)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        assert_eq!(
            render(&DependencyInfo::new()).unwrap(),
            "{\"dependencies\":[],\"licenseInfo\":{}}\n"
        );
    }
}
