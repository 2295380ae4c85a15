//! HTML-страницы. Шаблоны получают готовые данные и ничего не знают о базе.

use axum::response::Html;

use crate::models::{Booking, Movie, Role};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{} - BoxOffice</title></head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    ))
}

fn nav(links: &[(&str, &str)]) -> String {
    let items: Vec<String> = links
        .iter()
        .map(|(href, label)| format!("<a href=\"{}\">{}</a>", href, label))
        .collect();
    format!("<nav>{} | <a href=\"/logout\">Logout</a></nav>", items.join(" | "))
}

fn movies_table(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "<p>No movies yet.</p>".to_string();
    }
    let rows: String = movies
        .iter()
        .map(|m| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} min</td></tr>\n",
                m.id,
                escape(&m.title),
                escape(&m.genre),
                m.duration
            )
        })
        .collect();
    format!(
        "<table>\n<tr><th>ID</th><th>Title</th><th>Genre</th><th>Duration</th></tr>\n{}</table>",
        rows
    )
}

pub fn login(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let options: String = Role::ALL
        .iter()
        .map(|r| format!("<option value=\"{0}\">{0}</option>", r.as_str()))
        .collect();
    page(
        "Login",
        &format!(
            "{}<form method=\"post\" action=\"/login\">\n\
             <label>Username <input name=\"username\" required></label>\n\
             <label>Password <input name=\"password\" type=\"password\" required></label>\n\
             <label>Role <select name=\"role\">{}</select></label>\n\
             <button type=\"submit\">Login</button>\n</form>",
            error, options
        ),
    )
}

pub fn admin_dashboard(username: &str) -> Html<String> {
    page(
        "Admin Dashboard",
        &format!(
            "<p>Welcome, {}.</p>\n{}",
            escape(username),
            nav(&[("/admin/add_movie", "Add Movie"), ("/admin/view_movies", "View Movies")])
        ),
    )
}

pub fn add_movie_form() -> Html<String> {
    page(
        "Add Movie",
        &format!(
            "<form method=\"post\" action=\"/admin/add_movie\">\n\
             <label>Title <input name=\"title\" required></label>\n\
             <label>Genre <input name=\"genre\" required></label>\n\
             <label>Duration (minutes) <input name=\"duration\" type=\"number\" required></label>\n\
             <button type=\"submit\">Add</button>\n</form>\n{}",
            nav(&[("/admin/dashboard", "Dashboard"), ("/admin/view_movies", "View Movies")])
        ),
    )
}

pub fn admin_movies(movies: &[Movie]) -> Html<String> {
    page(
        "Movies",
        &format!(
            "{}\n{}",
            movies_table(movies),
            nav(&[("/admin/dashboard", "Dashboard"), ("/admin/add_movie", "Add Movie")])
        ),
    )
}

pub fn tech_admin_dashboard(username: &str) -> Html<String> {
    page(
        "Tech Admin Dashboard",
        &format!(
            "<p>Welcome, {}.</p>\n{}",
            escape(username),
            nav(&[("/tech_admin/change_password", "Change Password")])
        ),
    )
}

pub fn change_password_form() -> Html<String> {
    page(
        "Change Password",
        &format!(
            "<form method=\"post\" action=\"/tech_admin/change_password\">\n\
             <label>New password <input name=\"new_password\" type=\"password\" required></label>\n\
             <button type=\"submit\">Change</button>\n</form>\n{}",
            nav(&[("/tech_admin/dashboard", "Dashboard")])
        ),
    )
}

pub fn password_changed() -> Html<&'static str> {
    Html("Password changed successfully! <a href='/tech_admin/dashboard'>Back to Dashboard</a>")
}

pub fn customer_home(username: &str, movies: &[Movie]) -> Html<String> {
    page(
        "Now Showing",
        &format!(
            "<p>Welcome, {}.</p>\n{}\n{}",
            escape(username),
            movies_table(movies),
            nav(&[("/customer/booking", "Book Tickets"), ("/customer/history", "My Bookings")])
        ),
    )
}

pub fn booking_form(movies: &[Movie]) -> Html<String> {
    let options: String = movies
        .iter()
        .map(|m| format!("<option value=\"{0}\">{0}</option>", escape(&m.title)))
        .collect();
    page(
        "Book Tickets",
        &format!(
            "{}\n<form method=\"post\" action=\"/customer/booking\">\n\
             <label>Movie <select name=\"movie_title\">{}</select></label>\n\
             <label>Date <input name=\"date\" type=\"date\" required></label>\n\
             <label>Tickets <input name=\"tickets\" type=\"number\" value=\"1\" required></label>\n\
             <button type=\"submit\">Book</button>\n</form>\n{}",
            movies_table(movies),
            options,
            nav(&[("/customer/home", "Home"), ("/customer/history", "My Bookings")])
        ),
    )
}

pub fn booking_history(bookings: &[Booking]) -> Html<String> {
    let table = if bookings.is_empty() {
        "<p>No bookings yet.</p>".to_string()
    } else {
        let rows: String = bookings
            .iter()
            .map(|b| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    b.id,
                    escape(&b.movie_title),
                    b.booking_date.format("%Y-%m-%d"),
                    b.tickets
                )
            })
            .collect();
        format!(
            "<table>\n<tr><th>ID</th><th>Movie</th><th>Date</th><th>Tickets</th></tr>\n{}</table>",
            rows
        )
    };
    page(
        "My Bookings",
        &format!(
            "{}\n{}",
            table,
            nav(&[("/customer/home", "Home"), ("/customer/booking", "Book Tickets")])
        ),
    )
}
