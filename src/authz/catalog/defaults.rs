//! Default permission catalog and system roles

use super::codes::{self, roles};
use super::types::{PermissionDef, SystemRoleDef};

macro_rules! permission {
    ($code:expr, $name:expr, $category:expr) => {
        PermissionDef {
            code: $code,
            name: $name,
            category: $category,
        }
    };
}

/// Every permission installed by bootstrap
pub const DEFAULT_PERMISSIONS: &[PermissionDef] = &[
    permission!(codes::MANAGE_SYSTEM, "Manage system", "System"),
    permission!(codes::MANAGE_ROLES, "Manage roles", "System"),
    permission!(codes::ASSIGN_ROLES, "Assign roles to users", "System"),
    permission!(codes::VIEW_AUDIT_LOGS, "View audit logs", "System"),
    permission!(codes::PURGE_AUDIT_LOGS, "Clean up old audit logs", "System"),
    permission!(codes::VIEW_STUDENTS, "View students", "Students"),
    permission!(codes::MANAGE_STUDENTS, "Manage students", "Students"),
    permission!(codes::VIEW_COURSES, "View courses", "Courses"),
    permission!(codes::MANAGE_ALL_COURSES, "Manage all courses", "Courses"),
    permission!(codes::MANAGE_OWN_COURSES, "Manage own courses", "Courses"),
    permission!(codes::UPLOAD_SYLLABUS, "Upload syllabus", "Courses"),
    permission!(codes::UPLOAD_RESOURCES, "Upload learning resources", "Courses"),
    permission!(codes::VIEW_ATTENDANCE, "View attendance", "Attendance"),
    permission!(codes::VIEW_OWN_ATTENDANCE, "View own attendance", "Attendance"),
    permission!(codes::MANAGE_ATTENDANCE, "Mark attendance", "Attendance"),
    permission!(codes::VIEW_GRADES, "View grades", "Grades"),
    permission!(codes::VIEW_OWN_GRADES, "View own grades", "Grades"),
    permission!(codes::MANAGE_GRADES, "Enter grades", "Grades"),
    permission!(codes::VIEW_ASSIGNMENTS, "View assignments", "Assignments"),
    permission!(codes::SUBMIT_ASSIGNMENTS, "Submit assignments", "Assignments"),
    permission!(codes::MANAGE_ASSIGNMENTS, "Manage assignments", "Assignments"),
    permission!(codes::VIEW_LIBRARY, "View library", "Library"),
    permission!(codes::MANAGE_LIBRARY, "Manage library", "Library"),
    permission!(codes::VIEW_OWN_FEES, "View own fees", "Fees"),
    permission!(codes::VIEW_ALL_FEES, "View all fees", "Fees"),
    permission!(codes::MANAGE_FEES, "Manage fees", "Fees"),
    permission!(codes::VIEW_TIMETABLE, "View timetable", "Timetable"),
    permission!(codes::VIEW_EVENTS, "View events", "Timetable"),
    permission!(codes::REQUEST_GATE_PASS, "Request gate pass", "Hostel"),
    permission!(codes::APPROVE_GATE_PASS, "Approve gate pass", "Hostel"),
    permission!(codes::APPROVE_LEAVE, "Approve leave", "Hostel"),
    permission!(codes::VIEW_EMPLOYEES, "View employees", "Staff"),
    permission!(codes::MANAGE_FACULTY, "Manage faculty", "Staff"),
    permission!(codes::MANAGE_PAYROLL, "Manage payroll", "Staff"),
    permission!(codes::APPROVE_PAYROLL, "Approve payroll", "Staff"),
    permission!(codes::VIEW_ATTENDANCE_REPORT, "Attendance report", "Reports"),
    permission!(codes::VIEW_GRADES_REPORT, "Grades report", "Reports"),
    permission!(codes::VIEW_FEES_REPORT, "Fees report", "Reports"),
];

/// System roles installed by bootstrap
pub const SYSTEM_ROLES: &[SystemRoleDef] = &[
    SystemRoleDef {
        code: roles::ADMIN,
        name: "Administrator",
        description: "Full access to every module",
        grants: None,
    },
    SystemRoleDef {
        code: roles::FACULTY,
        name: "Faculty",
        description: "Teaching staff",
        grants: Some(&[
            codes::VIEW_STUDENTS,
            codes::VIEW_COURSES,
            codes::MANAGE_OWN_COURSES,
            codes::UPLOAD_SYLLABUS,
            codes::UPLOAD_RESOURCES,
            codes::VIEW_ATTENDANCE,
            codes::MANAGE_ATTENDANCE,
            codes::VIEW_GRADES,
            codes::MANAGE_GRADES,
            codes::VIEW_ASSIGNMENTS,
            codes::MANAGE_ASSIGNMENTS,
            codes::VIEW_LIBRARY,
            codes::VIEW_TIMETABLE,
            codes::VIEW_EVENTS,
        ]),
    },
    SystemRoleDef {
        code: roles::STUDENT,
        name: "Student",
        description: "Enrolled student",
        grants: Some(&[
            codes::VIEW_COURSES,
            codes::VIEW_OWN_ATTENDANCE,
            codes::VIEW_OWN_GRADES,
            codes::VIEW_ASSIGNMENTS,
            codes::SUBMIT_ASSIGNMENTS,
            codes::VIEW_LIBRARY,
            codes::VIEW_OWN_FEES,
            codes::VIEW_TIMETABLE,
            codes::VIEW_EVENTS,
            codes::REQUEST_GATE_PASS,
        ]),
    },
    SystemRoleDef {
        code: roles::WARDEN,
        name: "Warden",
        description: "Hostel warden",
        grants: Some(&[
            codes::VIEW_STUDENTS,
            codes::APPROVE_GATE_PASS,
            codes::APPROVE_LEAVE,
            codes::VIEW_EVENTS,
        ]),
    },
    SystemRoleDef {
        code: roles::FINANCE,
        name: "Finance Officer",
        description: "Fees and payroll",
        grants: Some(&[
            codes::VIEW_STUDENTS,
            codes::VIEW_ALL_FEES,
            codes::MANAGE_FEES,
            codes::VIEW_EMPLOYEES,
            codes::MANAGE_PAYROLL,
            codes::APPROVE_PAYROLL,
            codes::VIEW_FEES_REPORT,
        ]),
    },
    SystemRoleDef {
        code: roles::EXAM_COORD,
        name: "Exam Coordinator",
        description: "Examinations and results",
        grants: Some(&[
            codes::VIEW_STUDENTS,
            codes::VIEW_COURSES,
            codes::VIEW_GRADES,
            codes::MANAGE_GRADES,
            codes::VIEW_TIMETABLE,
            codes::VIEW_ATTENDANCE_REPORT,
            codes::VIEW_GRADES_REPORT,
        ]),
    },
];

/// Whether `code` is part of the default catalog
pub fn is_known_code(code: &str) -> bool {
    DEFAULT_PERMISSIONS.iter().any(|p| p.code == code)
}
