//! HTML bodies of the portal's transactional emails.
//!
//! All interpolated values are HTML-escaped.

pub const WELCOME_SUBJECT: &str = "Bienvenido/a al Portal de Clientes de InsightPlace";

pub fn new_report_subject(report_title: &str) -> String {
    format!("Nuevo reporte disponible: {report_title}")
}

/// Escape the five characters significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

const HEADER: &str = r#"<div style="background-color: #dc2626; padding: 20px; text-align: center; border-radius: 8px 8px 0 0;">
      <h1 style="color: white; margin: 0;">InsightPlace</h1>
      <p style="color: white; margin: 5px 0 0 0;">Portal de Clientes</p>
    </div>"#;

const FOOTER: &str = r#"<div style="text-align: center; padding: 20px; color: #9ca3af; font-size: 12px;">
      <p>&copy; InsightPlace. Todos los derechos reservados.</p>
      <p>Este correo fue enviado desde contacto@insight-place.com</p>
    </div>"#;

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
  </head>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    {HEADER}
    <div style="background-color: #f9fafb; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 8px 8px;">
{body}
    </div>
    {FOOTER}
  </body>
</html>
"#
    )
}

fn button(portal_url: &str, label: &str) -> String {
    format!(
        r#"      <div style="text-align: center; margin: 30px 0;">
        <a href="{}/login" style="background-color: #dc2626; color: white; padding: 12px 30px; text-decoration: none; border-radius: 6px; font-weight: bold;">{label}</a>
      </div>"#,
        escape_html(portal_url.trim_end_matches('/'))
    )
}

/// Welcome email carrying the initial credentials of a new account.
pub fn welcome_email_html(user_name: &str, user_email: &str, password: &str, portal_url: &str) -> String {
    let body = format!(
        r#"      <h2 style="color: #1f2937; margin-top: 0;">¡Bienvenido/a, {name}!</h2>
      <p>Se ha creado tu cuenta en el Portal de Clientes de InsightPlace. A continuación encontrarás tus credenciales de acceso:</p>
      <div style="background-color: white; padding: 20px; border-radius: 8px; border: 1px solid #e5e7eb; margin: 20px 0;">
        <p style="margin: 5px 0;"><strong>Correo electrónico:</strong> {email}</p>
        <p style="margin: 5px 0;"><strong>Contraseña:</strong> {password}</p>
      </div>
      <p style="color: #dc2626;"><strong>Importante:</strong> Te recomendamos cambiar tu contraseña después de iniciar sesión por primera vez.</p>
{button}
      <p style="color: #6b7280; font-size: 14px;">Si tienes alguna pregunta, no dudes en contactarnos.</p>"#,
        name = escape_html(user_name),
        email = escape_html(user_email),
        password = escape_html(password),
        button = button(portal_url, "Acceder al Portal"),
    );
    layout(&body)
}

/// Notification that a report was published for the recipient's company.
pub fn new_report_email_html(
    user_name: &str,
    report_title: &str,
    company_name: &str,
    portal_url: &str,
) -> String {
    let body = format!(
        r#"      <h2 style="color: #1f2937; margin-top: 0;">Hola, {name}</h2>
      <p>Se ha publicado un nuevo reporte para <strong>{company}</strong>:</p>
      <div style="background-color: white; padding: 20px; border-radius: 8px; border: 1px solid #e5e7eb; margin: 20px 0; border-left: 4px solid #dc2626;">
        <h3 style="color: #1f2937; margin: 0 0 10px 0;">{title}</h3>
        <p style="color: #6b7280; margin: 0;">Disponible en tu portal</p>
      </div>
{button}
      <p style="color: #6b7280; font-size: 14px;">Accede al portal para consultar el reporte completo.</p>"#,
        name = escape_html(user_name),
        company = escape_html(company_name),
        title = escape_html(report_title),
        button = button(portal_url, "Ver Reporte"),
    );
    layout(&body)
}
