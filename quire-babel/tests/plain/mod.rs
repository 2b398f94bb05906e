mod to_html;
mod to_markdown;
