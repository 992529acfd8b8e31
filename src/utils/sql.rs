/// 转义 LIKE 模式中的通配符，配合 `ESCAPE '\'` 使用
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 生成不区分大小写的包含匹配模式
///
/// 只折叠 ASCII 字母，与 SQLite 的 `LOWER()` 一致；非 ASCII 字母按原样匹配。
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like_pattern(&input.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_pattern("math"), "math");
    }

    #[test]
    fn test_contains_pattern_lowercases() {
        assert_eq!(contains_pattern("MaTh"), "%math%");
        assert_eq!(contains_pattern("ÉLODIE"), "%Élodie%");
    }
}
