//! Plain-English rendering of cooldown numbers.

use crate::services::errors::failure::BucketScope;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spell out `n` for n < 1000; larger numbers stay as digits
pub fn number_to_words(n: u32) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{}-{}", tens, ONES[ones as usize]),
            }
        }
        100..=999 => {
            let hundreds = format!("{} hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{} and {}", hundreds, number_to_words(rest)),
            }
        }
        _ => n.to_string(),
    }
}

/// "once", "twice", "three times", ...
pub fn rate_words(rate: u32) -> String {
    match rate {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{} times", number_to_words(n)),
    }
}

/// "45 sec", "60 sec", "1 min 30 sec", "2 min"
pub fn format_seconds(total: u64) -> String {
    if total > 60 {
        let mins = total / 60;
        let secs = total % 60;
        if secs == 0 {
            format!("{} min", mins)
        } else {
            format!("{} min {} sec", mins, secs)
        }
    } else {
        format!("{} sec", total)
    }
}

/// Suffix naming what the cooldown counts against, with a leading space
pub fn scope_suffix(scope: BucketScope) -> &'static str {
    match scope {
        BucketScope::Global => "",
        BucketScope::User => " per user",
        BucketScope::Member => " per member",
        BucketScope::Guild => " per server",
        BucketScope::Channel => " per channel",
        BucketScope::Category => " per channel category",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_words() {
        assert_eq!(rate_words(1), "once");
        assert_eq!(rate_words(2), "twice");
        assert_eq!(rate_words(3), "three times");
        assert_eq!(rate_words(21), "twenty-one times");
        assert_eq!(rate_words(40), "forty times");
        assert_eq!(rate_words(105), "one hundred and five times");
        assert_eq!(rate_words(1500), "1500 times");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(45), "45 sec");
        assert_eq!(format_seconds(60), "60 sec");
        assert_eq!(format_seconds(90), "1 min 30 sec");
        assert_eq!(format_seconds(125), "2 min 5 sec");
        assert_eq!(format_seconds(120), "2 min");
    }

    #[test]
    fn test_scope_suffix() {
        assert_eq!(scope_suffix(BucketScope::User), " per user");
        assert_eq!(scope_suffix(BucketScope::Guild), " per server");
        assert_eq!(scope_suffix(BucketScope::Category), " per channel category");
        assert_eq!(scope_suffix(BucketScope::Global), "");
    }
}
