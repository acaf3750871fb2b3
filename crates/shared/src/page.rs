use anyhow::{Context, Result};
use pulldown_cmark::{html, Event, Options, Parser};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Topic, TOPICS};
use crate::feed::Headline;

const SCHEDULE_NOTE: &str = "뉴스는 매일 오전 9시,오후 12시,오후 5시,오후 9시에 갱신됩니다";

/// Everything one topic page is built from
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub topic: &'a Topic,
    pub date: &'a str,
    pub headlines: &'a [Headline],
    pub summary: &'a str,
}

pub struct PageRenderer;

impl PageRenderer {
    pub fn render(ctx: &PageContext<'_>) -> String {
        let mut html = String::new();
        let label = Self::escape_html(ctx.topic.label);
        let date = Self::escape_html(ctx.date);

        html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(&format!("  <title>{} {} 뉴스 요약</title>\n", date, label));
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        Self::push_style(&mut html);
        html.push_str("</head>\n<body>\n");

        // Slide-out panel for narrow viewports
        html.push_str(
            "  <button class=\"menu-btn\" id=\"menuBtn\" aria-label=\"주제 메뉴 열기\">☰</button>\n",
        );
        html.push_str("  <div class=\"menu-panel\" id=\"menuPanel\">\n");
        html.push_str("    <div style=\"text-align:right; margin-bottom:2rem;\"><button onclick=\"closeMenu()\" style=\"font-size:1.5em; background:none; border:none; color:#0055a5;\">×</button></div>\n");
        for item in Self::nav_links(ctx.topic, "menu-item") {
            html.push_str(&format!("    {}\n", item));
        }
        html.push_str("  </div>\n");

        // Tab strip for wide viewports
        html.push_str("  <div class=\"tabs\">\n");
        for tab in Self::nav_links(ctx.topic, "tab") {
            html.push_str(&format!("    {}\n", tab));
        }
        html.push_str("  </div>\n");

        html.push_str(&format!("  <h1>{} 뉴스 요약</h1>\n", label));
        html.push_str(&format!(
            "  <div class=\"date\">날짜: {} - {}</div>\n",
            date, SCHEDULE_NOTE
        ));
        html.push_str(&format!(
            "  <div class=\"summary\">\n{}  </div>\n",
            Self::markdown_to_html(ctx.summary)
        ));

        html.push_str("  <h2>주요 뉴스 제목</h2>\n");
        html.push_str("  <ul>\n");
        for headline in ctx.headlines {
            html.push_str(&format!(
                "    <li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>\n",
                Self::escape_html(&headline.link),
                Self::escape_html(&headline.title)
            ));
        }
        html.push_str("  </ul>\n");

        html.push_str("  <footer style=\"margin-top:2rem;font-size:0.9em;color:#aaa;\">Powered by Google Gemini &amp; 연합뉴스</footer>\n");
        Self::push_script(&mut html);
        html.push_str("</body>\n</html>\n");
        html
    }

    /// One anchor per catalog topic; only `current` carries `active`
    fn nav_links(current: &Topic, class: &str) -> Vec<String> {
        TOPICS
            .iter()
            .map(|t| {
                let active = if t.id == current.id { " active" } else { "" };
                format!(
                    "<a class=\"{}{}\" href=\"{}\">{}</a>",
                    class,
                    active,
                    t.page_filename(),
                    Self::escape_html(t.label)
                )
            })
            .collect()
    }

    fn push_style(html: &mut String) {
        html.push_str("  <style>\n");
        html.push_str("    body { font-family: 'Noto Sans KR', sans-serif; margin: 2rem; background: #f9f9f9; color: #222; }\n");
        html.push_str("    h1 { color: #0055a5; }\n");
        html.push_str("    .summary { background: #e3f0ff; padding: 1rem; border-radius: 8px; margin-bottom: 2rem; }\n");
        html.push_str("    ul { padding-left: 1.2rem; }\n");
        html.push_str("    li { margin-bottom: 0.5rem; }\n");
        html.push_str("    .date { color: #888; font-size: 0.95em; margin-bottom: 1rem; }\n");
        html.push_str("    .tabs { margin-bottom: 2rem; }\n");
        html.push_str("    .tab { display: inline-block; margin-right: 1rem; padding: 0.5rem 1rem; background: #eee; border-radius: 5px; text-decoration: none; color: #0055a5; }\n");
        html.push_str("    .tab.active { background: #0055a5; color: #fff; }\n");
        html.push_str("    .menu-btn { display: none; position: fixed; top: 1.2rem; right: 2rem; z-index: 100; width: 36px; height: 36px; background: #0055a5; border: none; border-radius: 5px; color: #fff; font-size: 2rem; align-items: center; justify-content: center; }\n");
        html.push_str("    .menu-panel { display: none; position: fixed; top: 0; right: 0; width: 220px; height: 100%; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.1); z-index: 200; padding: 2rem 1rem; }\n");
        html.push_str("    .menu-item { display: block; margin-bottom: 1.2rem; font-size: 1.1em; color: #0055a5; text-decoration: none; }\n");
        html.push_str("    .menu-item.active { font-weight: bold; color: #222; }\n");
        html.push_str("    @media (max-width: 800px) {\n");
        html.push_str("      .tabs { display: none; }\n");
        html.push_str("      .menu-btn { display: flex; }\n");
        html.push_str("    }\n");
        html.push_str("    @media (min-width: 801px) {\n");
        html.push_str("      .menu-btn, .menu-panel { display: none !important; }\n");
        html.push_str("      .tabs { display: block; }\n");
        html.push_str("    }\n");
        html.push_str("  </style>\n");
    }

    fn push_script(html: &mut String) {
        html.push_str("  <script>\n");
        html.push_str("    const menuBtn = document.getElementById('menuBtn');\n");
        html.push_str("    const menuPanel = document.getElementById('menuPanel');\n");
        html.push_str("    menuBtn.onclick = function() {\n");
        html.push_str("      menuPanel.style.display = 'block';\n");
        html.push_str("      document.body.style.overflow = 'hidden';\n");
        html.push_str("    };\n");
        html.push_str("    function closeMenu() {\n");
        html.push_str("      menuPanel.style.display = 'none';\n");
        html.push_str("      document.body.style.overflow = '';\n");
        html.push_str("    }\n");
        html.push_str("    window.closeMenu = closeMenu;\n");
        html.push_str("    menuPanel.addEventListener('click', function(e) {\n");
        html.push_str("      if (e.target === menuPanel) closeMenu();\n");
        html.push_str("    });\n");
        html.push_str("  </script>\n");
    }

    /// Model output is markdown; raw HTML inside it is shown as text.
    fn markdown_to_html(markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| {
            match event {
                Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
                other => other,
            }
        });

        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Write the page as `latest_<id>.html` under `dir`, replacing any previous run's file.
    pub fn save(content: &str, dir: &Path, topic: &Topic) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let filepath = dir.join(topic.page_filename());
        let tmp_path = dir.join(format!(".{}.tmp", topic.page_filename()));

        let written = fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write page file: {}", tmp_path.display()))
            .and_then(|()| {
                fs::rename(&tmp_path, &filepath).with_context(|| {
                    format!("Failed to replace page file: {}", filepath.display())
                })
            });

        // Never leave a half-written temp file behind
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        Ok(filepath)
    }
}
