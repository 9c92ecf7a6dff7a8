//! RSS and landing page templates

use serde_json::Value;
use std::fmt::Write;

use super::filters::{artist_link, escape_xml, image_url, items, text};
use crate::error::RenderError;
use crate::utils::dates::{now_rfc822, rfc822_date};

const PROFILE_URL: &str = "https://www.last.fm/user/";

/// One `<item>` of a channel
struct Item {
    title: String,
    link: String,
    guid: String,
    description: String,
    pub_date: String,
}

fn field<'a>(
    context: &'a Value,
    template: &'static str,
    field: &'static str,
) -> Result<&'a Value, RenderError> {
    match context.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(RenderError::MissingField { template, field }),
    }
}

fn str_field<'a>(
    context: &'a Value,
    template: &'static str,
    name: &'static str,
) -> Result<&'a str, RenderError> {
    field(context, template, name)?
        .as_str()
        .ok_or(RenderError::MissingField {
            template,
            field: name,
        })
}

// counts and ranks come as strings, sometimes as numbers
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn artwork(entry: &Value) -> String {
    let url = image_url(&entry["image"]);
    if url.is_empty() {
        String::new()
    } else {
        format!("<img src=\"{}\" alt=\"\"/><br/>", escape_xml(&url))
    }
}

fn channel(
    title: &str,
    link: &str,
    description: &str,
    items: &[Item],
) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<rss version="2.0">"#)?;
    writeln!(out, "<channel>")?;
    writeln!(out, "<title>{}</title>", escape_xml(title))?;
    writeln!(out, "<link>{}</link>", escape_xml(link))?;
    writeln!(out, "<description>{}</description>", escape_xml(description))?;
    writeln!(out, "<lastBuildDate>{}</lastBuildDate>", now_rfc822())?;

    for item in items {
        writeln!(out, "<item>")?;
        writeln!(out, "<title>{}</title>", escape_xml(&item.title))?;
        writeln!(out, "<link>{}</link>", escape_xml(&item.link))?;
        writeln!(
            out,
            "<guid isPermaLink=\"false\">{}</guid>",
            escape_xml(&item.guid)
        )?;
        writeln!(
            out,
            "<description>{}</description>",
            escape_xml(&item.description)
        )?;
        writeln!(out, "<pubDate>{}</pubDate>", item.pub_date)?;
        writeln!(out, "</item>")?;
    }

    writeln!(out, "</channel>")?;
    writeln!(out, "</rss>")?;
    Ok(out)
}

fn profile(user: &str) -> String {
    format!("{}{}", PROFILE_URL, user)
}

pub fn home(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "home", "user")?;
    let title = str_field(context, "home", "title")?;
    let base_url = context["base_url"].as_str().unwrap_or("/");

    let feeds = [
        ("Recent tracks", String::new()),
        ("Loved tracks", "/loved".to_string()),
        ("Top tracks this week", "/toptracks?period=week".to_string()),
        ("Top tracks this year", "/toptracks?period=year".to_string()),
        ("Top artists of all time", "/topartists?period=overall".to_string()),
        ("Weekly chart", "/weeklytracks".to_string()),
        ("Last 4 weeks chart", "/weeklytracks?weeks=4".to_string()),
    ];

    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Last.fm feeds</title></head><body>")?;
    writeln!(out, "<form method=\"post\" action=\"{}\">", escape_xml(base_url))?;
    writeln!(
        out,
        "<input name=\"user\" placeholder=\"Last.fm username\" value=\"{}\"/>",
        escape_xml(user)
    )?;
    writeln!(out, "<button type=\"submit\">Show my feeds</button></form>")?;
    writeln!(out, "<h2>{}</h2><ul>", escape_xml(title))?;
    for (label, suffix) in feeds {
        let url = format!("{}{}{}", base_url, user, suffix);
        writeln!(
            out,
            "<li>{}: <a href=\"{url}\">{url}</a></li>",
            label,
            url = escape_xml(&url)
        )?;
    }
    writeln!(out, "</ul></body></html>")?;
    Ok(out)
}

pub fn recent(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "recent", "user")?;
    let title = str_field(context, "recent", "title")?;
    let tracks = field(context, "recent", "tracks")?;

    let entries: Vec<Item> = items(&tracks["track"])
        .into_iter()
        .map(|track| {
            let artist = text(&track["artist"]);
            let name = text(&track["name"]);
            let album = text(&track["album"]);
            let url = text(&track["url"]).to_string();
            let now_playing = track["@attr"]["nowplaying"].as_str() == Some("true");

            let pub_date = if now_playing {
                now_rfc822()
            } else {
                rfc822_date(track["date"]["#text"].as_str())
            };
            let guid = if now_playing {
                format!("{}#nowplaying", url)
            } else {
                format!("{}#{}", url, scalar(&track["date"]["uts"]))
            };

            let mut description = artwork(track);
            description.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_xml(&artist_link(&url)),
                escape_xml(artist)
            ));
            if !album.is_empty() {
                description.push_str(&format!(" &#8211; {}", escape_xml(album)));
            }

            Item {
                title: format!("{} – {}", artist, name),
                link: url,
                guid,
                description,
                pub_date,
            }
        })
        .collect();

    channel(
        title,
        &profile(user),
        &format!("Tracks {} recently listened to", user),
        &entries,
    )
}

pub fn loved(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "loved", "user")?;
    let title = str_field(context, "loved", "title")?;
    let tracks = field(context, "loved", "tracks")?;

    let entries: Vec<Item> = items(&tracks["track"])
        .into_iter()
        .map(|track| {
            let artist = text(&track["artist"]);
            let name = text(&track["name"]);
            let url = text(&track["url"]).to_string();
            let artist_url = match track["artist"]["url"].as_str() {
                Some(link) if !link.is_empty() => link.to_string(),
                _ => artist_link(&url),
            };

            let mut description = artwork(track);
            description.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_xml(&artist_url),
                escape_xml(artist)
            ));

            Item {
                title: format!("{} – {}", artist, name),
                guid: format!("{}#{}", url, scalar(&track["date"]["uts"])),
                link: url,
                description,
                pub_date: rfc822_date(track["date"]["#text"].as_str()),
            }
        })
        .collect();

    channel(
        title,
        &format!("{}/loved", profile(user)),
        &format!("Tracks {} loved", user),
        &entries,
    )
}

fn ranked_tracks(tracks: &Value, pub_date: &str, guid_suffix: &str) -> Vec<Item> {
    items(&tracks["track"])
        .into_iter()
        .map(|track| {
            let artist = text(&track["artist"]);
            let name = text(&track["name"]);
            let url = text(&track["url"]).to_string();
            let rank = scalar(&track["@attr"]["rank"]);
            let plays = scalar(&track["playcount"]);

            let mut description = artwork(track);
            description.push_str(&format!(
                "<a href=\"{}\">{}</a> &#8211; {} plays",
                escape_xml(&artist_link(&url)),
                escape_xml(artist),
                plays
            ));

            Item {
                title: format!("#{} {} – {} ({} plays)", rank, artist, name, plays),
                guid: format!("{}#{}", url, guid_suffix),
                link: url,
                description,
                pub_date: pub_date.to_string(),
            }
        })
        .collect()
}

pub fn top_tracks(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "toptracks", "user")?;
    let title = str_field(context, "toptracks", "title")?;
    let period = str_field(context, "toptracks", "period")?;
    let tracks = field(context, "toptracks", "tracks")?;

    let entries = ranked_tracks(tracks, &now_rfc822(), period);

    channel(
        title,
        &format!("{}/library/tracks", profile(user)),
        &format!("Top tracks of {} [{}]", user, period),
        &entries,
    )
}

pub fn top_artists(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "topartists", "user")?;
    let title = str_field(context, "topartists", "title")?;
    let period = str_field(context, "topartists", "period")?;
    let artists = field(context, "topartists", "artists")?;

    let pub_date = now_rfc822();
    let entries: Vec<Item> = items(&artists["artist"])
        .into_iter()
        .map(|artist| {
            let name = text(&artist["name"]);
            let url = text(&artist["url"]).to_string();
            let rank = scalar(&artist["@attr"]["rank"]);
            let plays = scalar(&artist["playcount"]);

            let mut description = artwork(artist);
            description.push_str(&format!("{} plays", plays));

            Item {
                title: format!("#{} {} ({} plays)", rank, name, plays),
                guid: format!("{}#{}", url, period),
                link: url,
                description,
                pub_date: pub_date.clone(),
            }
        })
        .collect();

    channel(
        title,
        &format!("{}/library/artists", profile(user)),
        &format!("Top artists of {} [{}]", user, period),
        &entries,
    )
}

pub fn weekly_tracks(context: &Value) -> Result<String, RenderError> {
    let user = str_field(context, "weeklytracks", "user")?;
    let title = str_field(context, "weeklytracks", "title")?;
    let date = str_field(context, "weeklytracks", "date")?;
    let tracks = field(context, "weeklytracks", "tracks")?;

    let chart_end = scalar(&tracks["@attr"]["to"]);
    let entries = ranked_tracks(tracks, date, &chart_end);

    channel(
        title,
        &format!("{}/library/tracks", profile(user)),
        &format!("Weekly track chart of {}", user),
        &entries,
    )
}
