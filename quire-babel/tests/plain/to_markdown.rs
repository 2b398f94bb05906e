use insta::assert_snapshot;
use quire_babel::{markdown_to_html, plain_text_to_markdown, MarkdownOptions};

#[test]
fn tab_table_round_trip() {
    let md = plain_text_to_markdown("City\tPop\nLondon\t9000000");
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "| City | Pop |");
    assert!(lines[1].contains("---"));
    assert_eq!(lines[2], "| London | 9000000 |");
    for line in &lines {
        assert_eq!(line.matches('|').count(), 3);
    }
}

#[test]
fn structured_text_renders_as_markdown_table() {
    let md = plain_text_to_markdown("City\tPop\nLondon\t9000000\nParis\t2100000");
    let html = markdown_to_html(&md, &MarkdownOptions::default());
    assert_eq!(html.matches("<th>").count(), 2);
    assert_eq!(html.matches("<td>").count(), 4);
}

#[test]
fn memo_snapshot() {
    let text = "MEETING NOTES\n\
                Attendees\tRole\n\
                Ann\tLead\n\
                Bob\n\
                \n\
                • budget approved\n\
                * hiring paused\n\
                1. follow up\n\
                > quoted as is\n\
                CODE:\n\
                SELECT * FROM t;\n\
                ENDCODE";
    assert_snapshot!(plain_text_to_markdown(text), @r"
    # Meeting notes
    | Attendees | Role |
    | --- | --- |
    | Ann | Lead |

    Bob

    - budget approved
    - hiring paused
    1. follow up
    > quoted as is
    ```
    SELECT * FROM t;
    ```
    ");
}
