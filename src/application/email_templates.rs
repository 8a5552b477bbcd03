use url::Url;

use crate::validators::escape_html;

const ACCENT: &str = "#7e42f5";

fn origin_label(site_origin: &str) -> String {
    Url::parse(site_origin)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| site_origin.to_string())
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 18px;background-color:{ACCENT};color:#ffffff;text-decoration:none;border-radius:8px;font-weight:600;">{label}</a>"#
    )
}

/// Confirmation sent after a signup. `name` is escaped here.
pub fn confirmation_email(
    product_name: &str,
    site_origin: &str,
    name: &str,
    rank: u32,
) -> (String, String) {
    let subject = format!("Welcome to the {product_name} Waitlist!");
    let headline = format!("Welcome to {product_name}, {}!", escape_html(name));
    let lead = "Congratulations on joining our waitlist! We're excited to have you as part of our growing community.";
    let button = primary_button(site_origin, &format!("Visit {product_name}"));
    let body = format!(
        r#"<div style="background-color:rgba(126,66,245,0.1);border-radius:8px;padding:15px;margin:20px 0;border-left:4px solid {ACCENT};">
        <p style="margin:0;font-size:15px;color:#111827;">Your current waitlist position: <strong style="color:{ACCENT};">#{rank}</strong></p>
      </div>
      <p style="margin:0 0 16px;color:#374151;">We'll send you updates as we get closer to launch. You'll be among the first to get access when we're ready.</p>
      {button}"#
    );
    let reason = format!("you joined the {product_name} waitlist");

    let html = wrap_email(product_name, site_origin, &headline, lead, &body, &reason, None);
    (subject, html)
}

/// Collaborator request relayed to the team inbox. All user text is escaped.
pub fn contact_request_email(
    product_name: &str,
    site_origin: &str,
    name: &str,
    email: &str,
    message: &str,
    skills: Option<&str>,
) -> (String, String) {
    let name = escape_html(name);
    let email = escape_html(email);
    let message = escape_html(message).replace('\n', "<br>");
    let skills = skills
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "Not specified".to_string());

    let subject = format!("New collaboration request from {name}");
    let headline = "New collaboration request";
    let lead = format!("<strong>{name}</strong> ({email}) wants to work with the {product_name} team.");
    let body = format!(
        r#"<p style="margin:0 0 8px;color:#374151;"><strong>Skills:</strong> {skills}</p>
      <div style="margin:12px 0;padding:12px;background:#f9fafb;border-radius:8px;color:#111827;line-height:1.6;">{message}</div>"#
    );
    let reason = format!("someone used the contact form on {}", origin_label(site_origin));

    let html = wrap_email(
        product_name,
        site_origin,
        headline,
        &lead,
        &body,
        &reason,
        Some("Reply directly to the sender's address above."),
    );
    (subject, html)
}

pub fn wrap_email(
    product_name: &str,
    site_origin: &str,
    headline: &str,
    lead: &str,
    body_html: &str,
    reason: &str,
    footer_note: Option<&str>,
) -> String {
    let origin = origin_label(site_origin);
    let footer_note = footer_note
        .map(|note| {
            format!(r#"<p style="margin:8px 0 0;color:#4b5563;font-size:13px;">{note}</p>"#)
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <body style="background:#f8fafc;margin:0;padding:24px;font-family:Arial,Helvetica,sans-serif;">
    <div style="max-width:560px;margin:0 auto;background:#ffffff;border:1px solid #e5e7eb;border-radius:12px;padding:24px;">
      <div style="font-size:12px;letter-spacing:0.08em;text-transform:uppercase;color:{ACCENT};">{product_name} - {origin}</div>
      <h1 style="margin:12px 0 8px;font-size:22px;color:#111827;">{headline}</h1>
      <p style="margin:0 0 12px;font-size:15px;color:#111827;line-height:1.6;">{lead}</p>
      {body_html}
      <div style="margin-top:20px;padding-top:16px;border-top:1px solid #e5e7eb;">
        <p style="margin:0;font-size:13px;color:#4b5563;">Why you got this email: {reason}.</p>
        {footer_note}
      </div>
      <p style="margin:14px 0 0;font-size:12px;color:#9ca3af;">{product_name} Team</p>
    </div>
  </body>
</html>
"#
    )
}
