/// Text of `html` with tags removed. When the document has a `<body>`, only
/// what lies inside it is kept.
pub fn text_only(html: &str) -> String {
    if has_body(html) {
        show_only_body(html)
    } else {
        show_without_tag(html)
    }
}

fn has_body(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower.contains("<body>") || lower.contains("<body ")
}

fn show_without_tag(html: &str) -> String {
    let mut is_angle = 0;
    let mut body_without_tag = String::new();
    for c in html.chars() {
        if c == '<' {
            is_angle += 1;
        } else if c == '>' {
            if is_angle > 0 {
                is_angle -= 1;
            }
        } else if is_angle == 0 {
            body_without_tag.push(c);
        }
    }
    body_without_tag
}

fn show_only_body(html: &str) -> String {
    let mut is_angle = 0;
    let mut meet_body = false;
    let mut leave_body = false;
    let mut tag = String::new();
    let mut only_body = String::new();
    for c in html.chars() {
        if c == '<' {
            tag.clear();
            is_angle += 1;
        } else if c == '>' {
            let name = tag.to_ascii_lowercase();
            if name == "body" || name.starts_with("body ") {
                meet_body = true;
            } else if name.starts_with("/body") {
                leave_body = true;
            }
            tag.clear();
            if is_angle > 0 {
                is_angle -= 1;
            }
        } else if is_angle == 0 && meet_body && !leave_body {
            only_body.push(c);
        } else if is_angle >= 1 {
            tag.push(c);
        }
    }
    only_body
}
