// User-facing texts for validation messages and route responses
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" | "korean" => Ok(Locale::Ko),
            "en" | "en-us" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AccountRequired,
    AccountPattern,
    PasswordRequired,
    PasswordPattern,
    NameRequired,
    NamePatternHangul,
    NamePatternLatin,
    InvalidValue,
    ValidationFailed,
    LoginSucceeded,
    RegistrationSucceeded,
    UsersListed,
    UserUpdated,
    UserDeleted,
    Processed,
    InvalidDate,
    NothingToUpdate,
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        match self {
            Locale::Ko => ko(message),
            Locale::En => en(message),
        }
    }
}

fn ko(message: Message) -> &'static str {
    match message {
        Message::AccountRequired => "아이디는 필수 항목입니다.",
        Message::AccountPattern => "영어 대/소문자, 숫자, 4~8 글자 허용",
        Message::PasswordRequired => "비밀번호는 필수 항목입니다.",
        Message::PasswordPattern => "영어 대/소문자, 숫자, 특수문자(!@) 4~8 글자 허용",
        Message::NameRequired => "이름은 필수 항목입니다.",
        Message::NamePatternHangul => "한글 2~30글자 허용",
        Message::NamePatternLatin => "영어 대/소문자 2~30글자 허용",
        Message::InvalidValue => "유효하지 않은 값입니다.",
        Message::ValidationFailed => "입력값 검증에 실패했습니다.",
        Message::LoginSucceeded => "로그인 성공",
        Message::RegistrationSucceeded => "회원가입 성공",
        Message::UsersListed => "전체 유저 정보 조회 완료",
        Message::UserUpdated => "유저 정보 수정 완료",
        Message::UserDeleted => "유저 정보 삭제 완료",
        Message::Processed => "정상 처리",
        Message::InvalidDate => "날짜는 YYYY-MM-DD 형식이어야 합니다.",
        Message::NothingToUpdate => "수정할 항목이 없습니다.",
    }
}

fn en(message: Message) -> &'static str {
    match message {
        Message::AccountRequired => "Account is required.",
        Message::AccountPattern => "Upper/lower case letters and digits, 4 to 8 characters",
        Message::PasswordRequired => "Password is required.",
        Message::PasswordPattern => "Upper/lower case letters, digits and !@, 4 to 8 characters",
        Message::NameRequired => "Name is required.",
        Message::NamePatternHangul => "Hangul syllables only, 2 to 30 characters",
        Message::NamePatternLatin => "Upper/lower case letters only, 2 to 30 characters",
        Message::InvalidValue => "Invalid value.",
        Message::ValidationFailed => "Request validation failed.",
        Message::LoginSucceeded => "Login succeeded",
        Message::RegistrationSucceeded => "Registration succeeded",
        Message::UsersListed => "Fetched all users",
        Message::UserUpdated => "User updated",
        Message::UserDeleted => "User deleted",
        Message::Processed => "OK",
        Message::InvalidDate => "Dates must be formatted as YYYY-MM-DD.",
        Message::NothingToUpdate => "Nothing to update.",
    }
}

/// Locale configured for this process
pub fn locale() -> Locale {
    crate::config::config().validation.locale
}

/// Shorthand for a text in the configured locale
pub fn t(message: Message) -> &'static str {
    locale().text(message)
}
