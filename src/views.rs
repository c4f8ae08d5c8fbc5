//! Server-side HTML for the employee pages. Deliberately plain: one shared
//! layout, field values escaped before interpolation.

use crate::model::employee::Employee;

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn layout(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><a href=\"/employees\">Employees</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        content
    )
}

pub fn employee_list(employees: &[Employee]) -> String {
    let mut rows = String::new();
    for e in employees {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{phone}</td>\
             <td><a href=\"/employees/detail/{id}\">detail</a> \
             <a href=\"/employees/update/{id}\">edit</a> \
             <a href=\"/employees/delete/{id}\">delete</a></td></tr>\n",
            id = e.id,
            name = escape(&e.name),
            email = escape(&e.email),
            phone = escape(&e.phone),
        ));
    }

    layout(
        "Employees",
        &format!(
            "<h1>Employees</h1>\n\
             <form action=\"/employees/search\" method=\"get\">\
             <input type=\"text\" name=\"q\"><button>Search</button></form>\n\
             <table>\n<tr><th>ID</th><th>Name</th><th>Email</th><th>Phone</th><th></th></tr>\n\
             {rows}</table>\n"
        ),
    )
}

pub fn employee_detail(e: &Employee) -> String {
    let content = format!(
        "<h1>{name}</h1>\n<dl>\n\
         <dt>Email</dt><dd>{email}</dd>\n\
         <dt>Phone</dt><dd>{phone}</dd>\n\
         <dt>Address</dt><dd>{address}</dd>\n\
         <dt>Position</dt><dd>{position}</dd>\n\
         <dt>Shift</dt><dd>{shift}</dd>\n\
         <dt>Start date</dt><dd>{start_date}</dd>\n\
         <dt>Salary</dt><dd>{salary}</dd>\n\
         <dt>Role</dt><dd>{role}</dd>\n\
         </dl>\n\
         <form action=\"/employees/change-password/{id}\" method=\"post\">\n\
         <input type=\"password\" name=\"currentPassword\" placeholder=\"Current password\">\n\
         <input type=\"password\" name=\"newPassword\" placeholder=\"New password\">\n\
         <button>Change password</button>\n</form>\n",
        id = e.id,
        name = escape(&e.name),
        email = escape(&e.email),
        phone = escape(&e.phone),
        address = escape(&e.address),
        position = escape(e.position.as_deref().unwrap_or("")),
        shift = escape(e.shift.as_deref().unwrap_or("")),
        start_date = e.start_date.format("%Y-%m-%d %H:%M"),
        salary = e.salary,
        role = escape(&e.role),
    );

    layout(&e.name, &content)
}

pub fn employee_edit(e: &Employee) -> String {
    fn field(label: &str, name: &str, value: &str) -> String {
        format!(
            "<label>{label} <input type=\"text\" name=\"{name}\" value=\"{}\"></label><br>\n",
            escape(value)
        )
    }

    let content = format!(
        "<h1>Edit {name}</h1>\n\
         <form action=\"/employees/update/{id}\" method=\"post\">\n\
         {fields}\
         <button>Save</button>\n</form>\n",
        id = e.id,
        name = escape(&e.name),
        fields = [
            field("Name", "name", &e.name),
            field("Email", "email", &e.email),
            field("Phone", "phone", &e.phone),
            field("Address", "address", &e.address),
            field("Position", "position", e.position.as_deref().unwrap_or("")),
            field("Shift", "shift", e.shift.as_deref().unwrap_or("")),
            field("Salary", "salary", &e.salary.to_string()),
            field("Role", "role", &e.role),
        ]
        .concat(),
    );

    layout(&format!("Edit {}", e.name), &content)
}
