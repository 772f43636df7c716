use crate::context::AppContext;
use crate::error::CliResult;
use crate::handlers::DASHBOARD_HINT;

const FEATURES: [(&str, &str); 3] = [
    (
        "Citizen Science",
        "Contribute to groundbreaking research from anywhere in the world. Every observation counts.",
    ),
    (
        "Global Opportunities",
        "Post and apply for jobs that transcend borders, connecting talent with meaningful projects.",
    ),
    (
        "Collaborative Impact",
        "Join a community dedicated to solving global challenges through collective action.",
    ),
];

pub fn home(ctx: &AppContext) -> CliResult<String> {
    Ok(render_home(ctx.current_user()?.as_deref()))
}

pub fn render_home(username: Option<&str>) -> String {
    let mut lines = vec![
        "Empower Global Impact with Agora".to_string(),
        "A revolutionary platform connecting global citizens to scientific research and meaningful work opportunities".to_string(),
        String::new(),
    ];
    for (title, description) in FEATURES {
        lines.push(format!("* {}: {}", title, description));
    }
    lines.push(String::new());
    match username {
        Some(username) => {
            lines.push(format!("Logged in as {}.", username));
            lines.push(DASHBOARD_HINT.to_string());
        }
        None => lines.push("Run `agora login` or `agora register` to get started.".to_string()),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_for_visitor() {
        let output = render_home(None);
        assert!(output.starts_with("Empower Global Impact with Agora\n"));
        assert!(output.contains("* Collaborative Impact: "));
        assert!(output.ends_with("Run `agora login` or `agora register` to get started."));
    }

    #[test]
    fn test_home_for_user() {
        let output = render_home(Some("pia"));
        assert!(output.contains("Logged in as pia."));
        assert!(output.ends_with(DASHBOARD_HINT));
    }
}
