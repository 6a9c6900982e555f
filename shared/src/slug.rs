//! slug 生成规则

/// 名称 -> slug：转小写，连续空白替换为单个 `-`
///
/// 用于后端没有返回 slug 时补齐工具 / 分类的 slug。
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// 标题 -> slug（后台表单使用）
///
/// 比 [`slugify`] 更严格：去掉字母数字、下划线、空白和 `-` 以外的字符，
/// 并合并连续的 `-`。
pub fn slugify_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Tool", "my-tool")]
    #[case("  Image   Generation ", "image-generation")]
    #[case("GPT\t4", "gpt-4")]
    #[case("already-slugged", "already-slugged")]
    fn test_slugify(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    #[case("Hello, World!", "hello-world")]
    #[case("AI -- Agents  2.0", "ai-agents-20")]
    #[case("  trailing - ", "trailing")]
    fn test_slugify_title(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify_title(title), expected);
    }
}
