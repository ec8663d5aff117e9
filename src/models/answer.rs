//! 答案标记解析
//!
//! 把各种来源里的答案标记（字母 a-d、数字 1-4、罗马数字 I-IV）
//! 统一换算成从 0 开始的选项下标。

use phf::phf_map;

/// 罗马数字 → 选项下标（I-X，超出 0-3 的值留给校验阶段拒绝）
static ROMAN_INDEX: phf::Map<&'static str, u32> = phf_map! {
    "I" => 0,
    "II" => 1,
    "III" => 2,
    "IV" => 3,
    "V" => 4,
    "VI" => 5,
    "VII" => 6,
    "VIII" => 7,
    "IX" => 8,
    "X" => 9,
};

/// 字母标记换算下标：a/A→0 … d/D→3
pub fn index_from_letter(letter: char) -> Option<u32> {
    match letter.to_ascii_lowercase() {
        c @ 'a'..='d' => Some(c as u32 - 'a' as u32),
        _ => None,
    }
}

/// 数字标记换算下标：1→0 … 4→3
pub fn index_from_digit(digit: char) -> Option<u32> {
    match digit {
        c @ '1'..='4' => Some(c as u32 - '1' as u32),
        _ => None,
    }
}

/// 罗马数字标记换算下标（大小写不敏感）
pub fn index_from_roman(token: &str) -> Option<u32> {
    ROMAN_INDEX.get(token.to_ascii_uppercase().as_str()).copied()
}

/// 单字符标记换算下标：先按字母、再按数字
pub fn index_from_symbol(symbol: char) -> Option<u32> {
    index_from_letter(symbol).or_else(|| index_from_digit(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index() {
        assert_eq!(index_from_letter('a'), Some(0));
        assert_eq!(index_from_letter('D'), Some(3));
        assert_eq!(index_from_letter('e'), None);
    }

    #[test]
    fn test_digit_index() {
        assert_eq!(index_from_digit('1'), Some(0));
        assert_eq!(index_from_digit('4'), Some(3));
        assert_eq!(index_from_digit('5'), None);
        assert_eq!(index_from_digit('0'), None);
    }

    #[test]
    fn test_roman_index() {
        assert_eq!(index_from_roman("I"), Some(0));
        assert_eq!(index_from_roman("iv"), Some(3));
        assert_eq!(index_from_roman("X"), Some(9));
        assert_eq!(index_from_roman("XI"), None);
    }
}
