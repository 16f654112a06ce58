use crate::models::LeadStatus;

/// Map marker color for a stored status string. Unknown values get the `new` color.
pub fn status_color(status: &str) -> &'static str {
    match status.parse::<LeadStatus>() {
        Ok(s) => color_for(s),
        Err(_) => color_for(LeadStatus::New),
    }
}

pub fn color_for(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "#00FF00",
        LeadStatus::Contacted => "#3366FF",
        LeadStatus::Interested => "#FFD700",
        LeadStatus::Closed => "#808080",
        LeadStatus::Ignored => "#FF0000",
    }
}

/// Legend glyph for a status.
pub fn status_icon(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "🟢",
        LeadStatus::Contacted => "🔵",
        LeadStatus::Interested => "🟡",
        LeadStatus::Closed => "⚪",
        LeadStatus::Ignored => "🔴",
    }
}

/// `tel:` link with every non-digit removed. `None` for blank or digitless input.
pub fn format_phone_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("tel:{}", digits))
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("new"), "#00FF00");
        assert_eq!(status_color("contacted"), "#3366FF");
        assert_eq!(status_color("interested"), "#FFD700");
        assert_eq!(status_color("closed"), "#808080");
        assert_eq!(status_color("ignored"), "#FF0000");
    }

    #[test]
    fn test_unknown_status_uses_new_color() {
        assert_eq!(status_color("archived"), "#00FF00");
        assert_eq!(status_color(""), "#00FF00");
    }

    #[test]
    fn test_format_phone_link() {
        assert_eq!(format_phone_link("(664) 123-4567").as_deref(), Some("tel:6641234567"));
        assert_eq!(format_phone_link("+52 664 123 4567").as_deref(), Some("tel:526641234567"));
        assert_eq!(format_phone_link(""), None);
        assert_eq!(format_phone_link("n/a"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tacos & <Mas>"), "Tacos &amp; &lt;Mas&gt;");
        assert_eq!(escape_html("Don \"Chuy's\""), "Don &quot;Chuy&#39;s&quot;");
    }
}
