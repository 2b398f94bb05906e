mod to_markdown;
mod to_plain;
