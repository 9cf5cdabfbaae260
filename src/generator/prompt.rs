//! Prompt construction and response cleanup for the content generator

use crate::data::FormSpec;

/// Serialize a brief into the natural-language instruction sent to the
/// generator
pub fn build_prompt(spec: &FormSpec) -> String {
    format!(
        r#"You are an expert frontend React and Tailwind CSS developer.
Create a single-file HTML landing page based on the following specifications:

- **Product Name:** {page_name}
- **Type:** {page_type}
- **Description:** {description}
- **Target Audience:** {target_audience}
- **Key Benefits:** {benefits}
- **Hero Layout:** {hero_layout}
- **Color Theme Style:** {color_theme}

**Requirements:**
1. Return ONLY the raw HTML code. Do not wrap it in markdown code blocks (e.g., ```html).
2. Use **Tailwind CSS** via CDN for all styling.
3. Include a <script src="https://cdn.tailwindcss.com"></script> in the head.
4. Make it look professional, modern, and high-converting.
5. Ensure the design is fully responsive (mobile-first).
6. Use standard semantic HTML5 tags.
7. Use placeholder images from https://picsum.photos/800/600 or https://picsum.photos/400/400 where appropriate.
8. The body should have a white or very light background.
9. Include sections: Hero, Benefits/Features (using the provided benefits), Testimonials (make up 2 generic ones), and a Call to Action footer.
"#,
        page_name = spec.page_name,
        page_type = spec.page_type,
        description = spec.description,
        target_audience = spec.target_audience,
        benefits = spec.benefits.join(", "),
        hero_layout = spec.hero_layout.label(),
        color_theme = spec.color_theme.label(),
    )
}

/// Strip markdown code-fence wrapping from generated output. The prompt asks
/// the model not to fence its answer, but models do it anyway.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```html", "").replace("```", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_brief_fields() {
        let spec = FormSpec::initial();
        let prompt = build_prompt(&spec);
        assert!(prompt.contains("My Awesome Product"));
        assert!(prompt.contains("SaaS Product Launch"));
        assert!(prompt.contains("Save 10 hours a week, Increase engagement by 40%"));
        assert!(prompt.contains("**Hero Layout:** centered"));
        assert!(prompt.contains("**Color Theme Style:** modern"));
    }

    #[test]
    fn test_strip_code_fences() {
        let fenced = "```html\n<html></html>\n```";
        assert_eq!(strip_code_fences(fenced).trim(), "<html></html>");
    }

    #[test]
    fn test_strip_code_fences_passthrough() {
        let plain = "<html><body>ok</body></html>";
        assert_eq!(strip_code_fences(plain), plain);
    }
}
