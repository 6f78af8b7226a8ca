#[cfg(test)]
mod tests {
    use crate::generator::types::Section;
    use crate::generator::writer::format_sections;

    #[test]
    fn test_format_sections_renders_every_field() {
        let mut section = Section::new("Background", "History of the topic", true);
        section.content = "Once upon a time.".to_string();

        let formatted = format_sections(&[section]);
        assert!(formatted.contains("Section 1: Background"));
        assert!(formatted.contains("Description:\nHistory of the topic"));
        assert!(formatted.contains("Requires Research: \ntrue"));
        assert!(formatted.contains("Content:\nOnce upon a time."));
        assert!(formatted.contains(&"=".repeat(60)));
    }

    #[test]
    fn test_format_sections_marks_unwritten_content() {
        let section = Section::new("Pending", "Not drafted yet", true);
        let formatted = format_sections(&[section]);
        assert!(formatted.contains("[Not yet written]"));
    }

    #[test]
    fn test_format_sections_numbers_in_order() {
        let sections = vec![
            Section::new("First", "a", true),
            Section::new("Second", "b", false),
        ];
        let formatted = format_sections(&sections);

        let first = formatted.find("Section 1: First").unwrap();
        let second = formatted.find("Section 2: Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_format_sections_empty_list() {
        assert!(format_sections(&[]).is_empty());
    }
}
