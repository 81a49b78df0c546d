//! The sexagenary cycle and its name tables.

use std::fmt;

use serde::Serialize;

/// The ten heavenly stems.
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches.
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animal of each branch.
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// The five elements; each governs two consecutive stems.
pub const FIVE_ELEMENTS: [&str; 5] = ["木", "火", "土", "金", "水"];

/// The 24 solar terms, starting from the winter solstice at 270°.
pub const SOLAR_TERMS: [&str; 24] = [
    "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种",
    "夏至", "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
];

/// One of the sixty stem-branch pairs. Index 0 is 甲子.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SixtyCycle(u8);

impl SixtyCycle {
    /// 甲子, the first pair.
    pub const JIAZI: SixtyCycle = SixtyCycle(0);

    /// The pair at `index`, reduced mod 60.
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(60) as u8)
    }

    /// The pair with the given stem and branch indices. Stem and branch
    /// must share parity; no pair combines 甲 with 丑.
    pub fn from_parts(stem: u8, branch: u8) -> Option<Self> {
        if stem >= 10 || branch >= 12 || stem % 2 != branch % 2 {
            return None;
        }
        Some(Self::from_index(6 * i64::from(stem) - 5 * i64::from(branch)))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn stem(self) -> u8 {
        self.0 % 10
    }

    pub fn branch(self) -> u8 {
        self.0 % 12
    }

    pub fn stem_name(self) -> &'static str {
        HEAVENLY_STEMS[usize::from(self.stem())]
    }

    pub fn branch_name(self) -> &'static str {
        EARTHLY_BRANCHES[usize::from(self.branch())]
    }

    /// Element of the stem.
    pub fn element(self) -> &'static str {
        FIVE_ELEMENTS[usize::from(self.stem() / 2)]
    }

    /// Animal of the branch.
    pub fn zodiac(self) -> &'static str {
        ZODIAC_ANIMALS[usize::from(self.branch())]
    }

    /// The pair `n` steps later (or earlier, when negative).
    pub fn next(self, n: i64) -> Self {
        Self::from_index(i64::from(self.0) + n)
    }
}

impl fmt::Display for SixtyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem_name(), self.branch_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(SixtyCycle::JIAZI.to_string(), "甲子");
        assert_eq!(SixtyCycle::from_index(1).to_string(), "乙丑");
        assert_eq!(SixtyCycle::from_index(40).to_string(), "甲辰");
        assert_eq!(SixtyCycle::from_index(59).to_string(), "癸亥");
        assert_eq!(SixtyCycle::from_index(60), SixtyCycle::JIAZI);
        assert_eq!(SixtyCycle::from_index(-1).to_string(), "癸亥");
    }

    #[test]
    fn test_element_and_zodiac() {
        let jiachen = SixtyCycle::from_index(40);
        assert_eq!(jiachen.element(), "木");
        assert_eq!(jiachen.zodiac(), "龙");
        let guimao = SixtyCycle::from_index(39);
        assert_eq!(guimao.element(), "水");
        assert_eq!(guimao.zodiac(), "兔");
    }

    #[test]
    fn test_from_parts() {
        for i in 0..60 {
            let cycle = SixtyCycle::from_index(i);
            assert_eq!(SixtyCycle::from_parts(cycle.stem(), cycle.branch()), Some(cycle));
        }
        assert_eq!(SixtyCycle::from_parts(0, 1), None);
        assert_eq!(SixtyCycle::from_parts(10, 0), None);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(SixtyCycle::from_index(58).next(3), SixtyCycle::from_index(1));
        assert_eq!(SixtyCycle::JIAZI.next(-60), SixtyCycle::JIAZI);
    }
}
