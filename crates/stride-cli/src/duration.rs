//! Focus length parsing for the command line.
//!
//! Accepts unit strings (`25m`, `1h30m`, `90s`), clock strings (`25:00`,
//! `1:30:00`) and bare numbers, which are minutes. A leading `-` is kept so
//! the core can reject non-positive lengths with its own message.

pub fn parse_duration(input: &str) -> Result<i64, String> {
    let s = input.trim().to_lowercase();
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.as_str()),
    };
    if body.is_empty() {
        return Err("empty duration".to_string());
    }

    let secs = if body.contains(':') {
        parse_clock(body)?
    } else if body.chars().all(|c| c.is_ascii_digit()) {
        checked_mul(parse_number(body)?, 60)?
    } else {
        parse_units(body)?
    };
    Ok(sign * secs)
}

fn parse_clock(s: &str) -> Result<i64, String> {
    let parts = s
        .split(':')
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    let (h, m, sec) = match parts.as_slice() {
        [m, sec] => (0, *m, *sec),
        [h, m, sec] => (*h, *m, *sec),
        _ => return Err(format!("invalid clock duration '{s}', use MM:SS or HH:MM:SS")),
    };
    checked_add(checked_add(checked_mul(h, 3600)?, checked_mul(m, 60)?)?, sec)
}

fn parse_units(s: &str) -> Result<i64, String> {
    let mut total = 0i64;
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
            continue;
        }
        let scale = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(format!("unexpected '{ch}' in duration '{s}'")),
        };
        if current.is_empty() {
            return Err(format!("missing number before '{ch}' in duration '{s}'"));
        }
        total = checked_add(total, checked_mul(parse_number(&current)?, scale)?)?;
        current.clear();
    }

    if !current.is_empty() {
        return Err(format!(
            "missing unit after '{current}'. Use: 25m, 1h30m, 90s, 25:00"
        ));
    }
    Ok(total)
}

fn parse_number(s: &str) -> Result<i64, String> {
    s.parse::<i64>()
        .map_err(|_| format!("'{s}' is not a whole number"))
}

fn checked_mul(a: i64, b: i64) -> Result<i64, String> {
    a.checked_mul(b).ok_or_else(|| "duration is too long".to_string())
}

fn checked_add(a: i64, b: i64) -> Result<i64, String> {
    a.checked_add(b).ok_or_else(|| "duration is too long".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_strings() {
        assert_eq!(parse_duration("25m"), Ok(1500));
        assert_eq!(parse_duration("1h30m"), Ok(5400));
        assert_eq!(parse_duration("90s"), Ok(90));
        assert_eq!(parse_duration(" 1H5S "), Ok(3605));
    }

    #[test]
    fn clock_strings() {
        assert_eq!(parse_duration("25:00"), Ok(1500));
        assert_eq!(parse_duration("0:25:30"), Ok(1530));
        assert!(parse_duration("1:2:3:4").is_err());
    }

    #[test]
    fn bare_numbers_are_minutes() {
        assert_eq!(parse_duration("45"), Ok(2700));
        assert_eq!(parse_duration("0"), Ok(0));
    }

    #[test]
    fn sign_is_preserved() {
        assert_eq!(parse_duration("-5m"), Ok(-300));
    }

    #[test]
    fn malformed_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("25x").is_err());
        assert!(parse_duration("1h30").is_err());
        assert!(parse_duration("99999999999999999999h").is_err());
    }
}
