//! User-facing text. Labels are Korean to match the records users enter.

use mt_core::RecordStatus;
use mt_db::DbError;

pub const REGISTER_FIELDS_REQUIRED: &str = "이메일, 비밀번호, 차량 번호를 모두 입력해주세요.";
pub const LOGIN_FIELDS_REQUIRED: &str = "이메일과 비밀번호를 입력해주세요.";
pub const REGISTER_SUCCESS: &str = "회원가입이 완료되었습니다.";
pub const REGISTER_FAILED: &str = "회원가입 실패";
pub const LOGIN_SUCCESS: &str = "로그인되었습니다.";
pub const LOGIN_FAILED: &str = "로그인 실패";
pub const LOGOUT_FAILED: &str = "로그아웃 실패";
pub const PROFILE_RECOVERED: &str = "사용자 정보가 복구되었습니다. 차량 번호를 확인해주세요.";
pub const PROFILE_LOAD_FAILED: &str = "사용자 정보를 불러오지 못했습니다. 다시 로그인해주세요.";

pub const RECORD_CREATED: &str = "정비 기록이 추가되었습니다.";
pub const RECORD_CREATE_FAILED: &str = "정비 기록 추가 실패";
pub const RECORD_APPROVED: &str = "정비 기록을 승인했습니다.";
pub const RECORD_REJECTED: &str = "정비 기록을 거절했습니다.";
pub const STATUS_UPDATE_FAILED: &str = "상태 변경 실패";
pub const CAR_IDENTIFIER_UPDATED: &str = "차량 번호가 변경되었습니다.";
pub const CAR_IDENTIFIER_UPDATE_FAILED: &str = "차량 번호 변경 실패";
pub const CAR_IDENTIFIER_REQUIRED: &str = "차량 번호를 입력해주세요.";
pub const LIST_LOAD_FAILED: &str = "정비 기록 불러오기 실패";

pub const ADMIN_ONLY: &str = "관리자만 정비 기록을 추가할 수 있습니다.";
pub const OWNER_ONLY: &str = "차량 소유자만 승인 또는 거절할 수 있습니다.";
pub const NOT_SIGNED_IN: &str = "로그인이 필요합니다.";
pub const INVALID_DATE: &str = "날짜는 YYYY-MM-DD 형식이어야 합니다.";
pub const INVALID_STATUS: &str = "알 수 없는 상태";
pub const CONTROLLER_STOPPED: &str = "앱이 종료되었습니다.";

pub const NO_RECORDS: &str = "정비 기록이 없습니다.";
pub const NO_SEARCH_RESULTS: &str = "검색 결과가 없습니다.";

pub const APPROVE_LABEL: &str = "승인";
pub const REJECT_LABEL: &str = "거절";

pub fn field_required(field: Option<&str>) -> String {
    let name = match field {
        Some("car_identifier") => "차량 번호",
        Some("date") => "날짜",
        Some("record_type") => "정비 종류",
        Some("email") => "이메일",
        Some("password") => "비밀번호",
        _ => "필수 항목",
    };
    format!("{name}을(를) 입력해주세요.")
}

/// `"<action>: <reason>"`
pub fn failure(action: &str, reason: &str) -> String {
    format!("{action}: {reason}")
}

pub fn remote_failure_reason(error: &DbError) -> &'static str {
    match error {
        DbError::InvalidCredentials { .. } => "이메일 또는 비밀번호가 올바르지 않습니다.",
        DbError::EmailInUse { .. } => "이미 사용 중인 이메일입니다.",
        DbError::WeakPassword { .. } => "비밀번호는 6자 이상이어야 합니다.",
        DbError::NotFound { .. } => "대상을 찾을 수 없습니다.",
        DbError::Unavailable { .. } => "서비스에 연결할 수 없습니다.",
        _ => "서버 오류가 발생했습니다.",
    }
}

pub fn status_label(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Pending => "대기중",
        RecordStatus::InProgress => "진행중",
        RecordStatus::Approved => "승인됨",
        RecordStatus::Rejected => "거절됨",
        RecordStatus::Completed => "완료",
    }
}

pub fn status_icon(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Pending => "⏳",
        RecordStatus::InProgress => "🔧",
        RecordStatus::Approved => "✅",
        RecordStatus::Rejected => "❌",
        RecordStatus::Completed => "🏁",
    }
}

/// Glyph for a maintenance category, matched on keywords.
pub fn type_icon(record_type: &str) -> &'static str {
    let lowered = record_type.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if has(&["오일", "oil"]) {
        "🛢️"
    } else if has(&["타이어", "tire", "tyre"]) {
        "🛞"
    } else if has(&["브레이크", "brake"]) {
        "🛑"
    } else if has(&["배터리", "battery"]) {
        "🔋"
    } else if has(&["세차", "wash"]) {
        "🧽"
    } else {
        "🔧"
    }
}
