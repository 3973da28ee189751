// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数, 使用全局语言）
///
/// # 示例
/// ```no_run
/// use wuyun_ahi::i18n::t;
/// let msg = t("stage.fortune");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数, 使用全局语言）
///
/// # 示例
/// ```no_run
/// use wuyun_ahi::i18n::t_with_args;
/// let msg = t_with_args("summary.ganzhi", &[("ganzhi", "甲子")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// 按指定语言翻译（带参数）, 不读写全局语言
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_args(mut template: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        template = template.replace(&placeholder, v);
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale(DEFAULT_LOCALE);
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale(DEFAULT_LOCALE);
        let msg = t_with_args("summary.ganzhi", &[("ganzhi", "甲子")]);
        assert_eq!(msg, "甲子年");

        set_locale("en");
        let msg = t_with_args("summary.ganzhi", &[("ganzhi", "甲子")]);
        assert_eq!(msg, "Year 甲子");

        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_translate_in_explicit_locale() {
        let msg = t_in(
            "zh-CN",
            "stage.fortune",
            &[("n", "1"), ("host", "木"), ("guest", "土"), ("adequacy", "太过")],
        );
        assert_eq!(msg, "第 1 运, 主: 木, 客: 土太过");

        let msg = t_in(
            "en",
            "stage.fortune",
            &[("n", "1"), ("host", "木"), ("guest", "土"), ("adequacy", "太过")],
        );
        assert!(msg.starts_with("Fortune step 1"));
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let msg = t_in("fr", "summary.ganzhi", &[("ganzhi", "乙丑")]);
        assert_eq!(msg, "乙丑年");
    }
}
