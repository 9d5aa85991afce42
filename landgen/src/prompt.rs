//! Prompt composer
//!
//! The instruction template is a constant with structured fields. Composing a
//! prompt is a pure function of the template and the command: the command's
//! text is inserted verbatim, without escaping, at the theme position.

use std::fmt;

use tracing::debug;

use crate::command::Command;

/// One required section of the generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSection {
    pub title: &'static str,
    pub requirement: &'static str,
}

/// Fixed instruction template
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Who the model should act as
    pub persona: &'static str,
    /// What to build
    pub mission: &'static str,
    /// Sections the page must contain, in order
    pub sections: &'static [PageSection],
    /// Sentence introducing the user's theme
    pub theme_intro: &'static str,
    /// Rules for what the model returns
    pub output_rules: &'static [&'static str],
}

/// Template used for landing page generation
pub const LANDING_PAGE_TEMPLATE: PromptTemplate = PromptTemplate {
    persona: "You are an expert in digital marketing and web development.",
    mission: "Your mission is to create a complete, responsive HTML5 landing page styled with Tailwind CSS \
              to capture leads. The page must look modern and professional, with a pleasant color palette \
              and well-spaced design elements.",
    sections: &[
        PageSection {
            title: "Header",
            requirement: "A header with the product/service name in the top left corner.",
        },
        PageSection {
            title: "Hero Section",
            requirement: "A highlight section with a persuasive headline and a short description.",
        },
        PageSection {
            title: "Contact Form",
            requirement: "A lead capture form with the fields \"Name\" and \"Email\" and a \"Submit\" button \
                          whose text must change to \"Thank you!\" when clicked. The form needs no backend \
                          functionality, only the visual behavior of the button.",
        },
        PageSection {
            title: "Footer",
            requirement: "A simple footer with copyright information.",
        },
    ],
    theme_intro: "The theme and purpose of the landing page are based on the following user command:",
    output_rules: &[
        "Your output must be ONLY the complete, well-formatted HTML code, without any additional text or explanations.",
        "Include all necessary scripts and links, such as the Tailwind CSS link.",
        "Use pleasant colors and good design for the buttons and the form.",
        "Use the 'Inter' font imported via Google Fonts.",
    ],
};

/// A prompt ready to send to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Combine the template with the command's prompt text
pub fn compose(template: &PromptTemplate, command: &Command) -> ComposedPrompt {
    debug!(prompt_len = command.prompt.len(), "compose: called");
    let mut out = String::new();

    out.push_str(template.persona);
    out.push(' ');
    out.push_str(template.mission);
    out.push_str("\n\nThe landing page must include the following sections:\n");
    for (i, section) in template.sections.iter().enumerate() {
        out.push_str(&format!("{}. **{}:** {}\n", i + 1, section.title, section.requirement));
    }

    out.push('\n');
    out.push_str(template.theme_intro);
    out.push_str(&format!("\n\"{}\"\n\n", command.prompt));

    out.push_str(&template.output_rules.join(" "));
    out.push('\n');

    ComposedPrompt(out)
}
