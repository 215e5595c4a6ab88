pub const OTP_LENGTH: usize = 6;

pub fn validate_email(email: &str) -> Result<String, String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Please enter your email address".into());
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(trimmed.to_string())
        }
        _ => Err("Please enter a valid email address".into()),
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Please enter your password".into());
    }
    Ok(())
}

/// Strips spaces users paste between digit groups.
pub fn normalize_otp(raw: &str) -> Result<String, String> {
    let code: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(format!("Enter the {}-digit code from your email", OTP_LENGTH))
    }
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    validate_password(password)?;
    if password != confirmation {
        return Err("Passwords do not match".into());
    }
    Ok(())
}
