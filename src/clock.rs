//! 时钟的时间 / 日期格式化

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use tabhome_shared::{ClockFormat, Language};

const BN_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

const BN_MONTHS: [&str; 12] = [
    "জানুয়ারী",
    "ফেব্রুয়ারী",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn bn_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "রবিবার",
        Weekday::Mon => "সোমবার",
        Weekday::Tue => "মঙ্গলবার",
        Weekday::Wed => "বুধবার",
        Weekday::Thu => "বৃহস্পতিবার",
        Weekday::Fri => "শুক্রবার",
        Weekday::Sat => "শনিবার",
    }
}

fn en_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// 把 ASCII 数字替换为孟加拉数字
pub fn to_bengali_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => BN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// `hh:mm:ss`，各段补零；12 小时制下 0 点显示为 12
pub fn format_time<T: Timelike>(time: &T, format: ClockFormat) -> String {
    let hour = match format {
        ClockFormat::TwentyFourHour => time.hour(),
        ClockFormat::TwelveHour => match time.hour() % 12 {
            0 => 12,
            h => h,
        },
    };
    format!("{:02}:{:02}:{:02}", hour, time.minute(), time.second())
}

pub fn format_date(date: NaiveDate, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::Bn => format!(
            "{}, {} {}, {}",
            bn_weekday(date.weekday()),
            to_bengali_digits(&date.day().to_string()),
            BN_MONTHS[month],
            to_bengali_digits(&date.year().to_string()),
        ),
        Language::En => format!(
            "{}, {} {}, {}",
            en_weekday(date.weekday()),
            EN_MONTHS[month],
            date.day(),
            date.year(),
        ),
    }
}
