//! Well-known permission codes
//!
//! Call sites check these through `AuthzSession::has_permission`.

// System administration
pub const MANAGE_SYSTEM: &str = "MANAGE_SYSTEM";
pub const MANAGE_ROLES: &str = "MANAGE_ROLES";
pub const ASSIGN_ROLES: &str = "ASSIGN_ROLES";
pub const VIEW_AUDIT_LOGS: &str = "VIEW_AUDIT_LOGS";
pub const PURGE_AUDIT_LOGS: &str = "PURGE_AUDIT_LOGS";

// Students
pub const VIEW_STUDENTS: &str = "VIEW_STUDENTS";
pub const MANAGE_STUDENTS: &str = "MANAGE_STUDENTS";

// Courses
pub const VIEW_COURSES: &str = "VIEW_COURSES";
pub const MANAGE_ALL_COURSES: &str = "MANAGE_ALL_COURSES";
pub const MANAGE_OWN_COURSES: &str = "MANAGE_OWN_COURSES";
pub const UPLOAD_SYLLABUS: &str = "UPLOAD_SYLLABUS";
pub const UPLOAD_RESOURCES: &str = "UPLOAD_RESOURCES";

// Attendance
pub const VIEW_ATTENDANCE: &str = "VIEW_ATTENDANCE";
pub const VIEW_OWN_ATTENDANCE: &str = "VIEW_OWN_ATTENDANCE";
pub const MANAGE_ATTENDANCE: &str = "MANAGE_ATTENDANCE";

// Grades
pub const VIEW_GRADES: &str = "VIEW_GRADES";
pub const VIEW_OWN_GRADES: &str = "VIEW_OWN_GRADES";
pub const MANAGE_GRADES: &str = "MANAGE_GRADES";

// Assignments
pub const VIEW_ASSIGNMENTS: &str = "VIEW_ASSIGNMENTS";
pub const SUBMIT_ASSIGNMENTS: &str = "SUBMIT_ASSIGNMENTS";
pub const MANAGE_ASSIGNMENTS: &str = "MANAGE_ASSIGNMENTS";

// Library
pub const VIEW_LIBRARY: &str = "VIEW_LIBRARY";
pub const MANAGE_LIBRARY: &str = "MANAGE_LIBRARY";

// Fees
pub const VIEW_OWN_FEES: &str = "VIEW_OWN_FEES";
pub const VIEW_ALL_FEES: &str = "VIEW_ALL_FEES";
pub const MANAGE_FEES: &str = "MANAGE_FEES";

// Timetable and events
pub const VIEW_TIMETABLE: &str = "VIEW_TIMETABLE";
pub const VIEW_EVENTS: &str = "VIEW_EVENTS";

// Gate pass and leave
pub const REQUEST_GATE_PASS: &str = "REQUEST_GATE_PASS";
pub const APPROVE_GATE_PASS: &str = "APPROVE_GATE_PASS";
pub const APPROVE_LEAVE: &str = "APPROVE_LEAVE";

// Staff
pub const VIEW_EMPLOYEES: &str = "VIEW_EMPLOYEES";
pub const MANAGE_FACULTY: &str = "MANAGE_FACULTY";
pub const MANAGE_PAYROLL: &str = "MANAGE_PAYROLL";
pub const APPROVE_PAYROLL: &str = "APPROVE_PAYROLL";

// Reports
pub const VIEW_ATTENDANCE_REPORT: &str = "VIEW_ATTENDANCE_REPORT";
pub const VIEW_GRADES_REPORT: &str = "VIEW_GRADES_REPORT";
pub const VIEW_FEES_REPORT: &str = "VIEW_FEES_REPORT";

/// Well-known system role codes
pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const FACULTY: &str = "FACULTY";
    pub const STUDENT: &str = "STUDENT";
    pub const WARDEN: &str = "WARDEN";
    pub const FINANCE: &str = "FINANCE";
    pub const EXAM_COORD: &str = "EXAM_COORD";
}
