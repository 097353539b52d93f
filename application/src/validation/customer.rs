use validator::ValidateEmail;

use kernel::Violation;

use crate::transfer::{CreateCustomerDto, UpdateCustomerDto};
use crate::validation::{money, not_blank, INVALID_INPUT};

static INVALID_CPF: &str = "Invalid CPF input. Try again";
static INVALID_INCOME: &str = "Invalid income input. Try again";
static INVALID_EMAIL: &str = "Invalid email input. Try again";
static INVALID_EMAIL_FORMAT: &str = "Invalid email format. Try again";
static INVALID_ZIP_CODE: &str = "Invalid zip code input. Try again";
static INVALID_STREET: &str = "Invalid street input. Try again";

pub fn validate_create_customer(dto: &CreateCustomerDto) -> Vec<Violation> {
    let mut violations = Vec::new();
    not_blank(&mut violations, "firstName", &dto.first_name, INVALID_INPUT);
    not_blank(&mut violations, "lastName", &dto.last_name, INVALID_INPUT);
    if not_blank(&mut violations, "nationalId", &dto.national_id, INVALID_INPUT)
        && !is_valid_cpf(&dto.national_id)
    {
        violations.push(Violation::new("nationalId", "cpf", INVALID_CPF));
    }
    money(&mut violations, "income", &dto.income, INVALID_INCOME);
    if not_blank(&mut violations, "email", &dto.email, INVALID_EMAIL)
        && !dto.email.validate_email()
    {
        violations.push(Violation::new("email", "email", INVALID_EMAIL_FORMAT));
    }
    not_blank(&mut violations, "password", &dto.password, INVALID_INPUT);
    not_blank(&mut violations, "zipCode", &dto.zip_code, INVALID_ZIP_CODE);
    not_blank(&mut violations, "street", &dto.street, INVALID_STREET);
    violations
}

/// Only the fields present in the update are checked.
pub fn validate_update_customer(dto: &UpdateCustomerDto) -> Vec<Violation> {
    let mut violations = Vec::new();
    if let Some(first_name) = &dto.first_name {
        not_blank(&mut violations, "firstName", first_name, INVALID_INPUT);
    }
    if let Some(last_name) = &dto.last_name {
        not_blank(&mut violations, "lastName", last_name, INVALID_INPUT);
    }
    if let Some(income) = &dto.income {
        money(&mut violations, "income", income, INVALID_INCOME);
    }
    if let Some(zip_code) = &dto.zip_code {
        not_blank(&mut violations, "zipCode", zip_code, INVALID_ZIP_CODE);
    }
    if let Some(street) = &dto.street {
        not_blank(&mut violations, "street", street, INVALID_STREET);
    }
    violations
}

/// Brazilian CPF: eleven digits (optionally written as `000.000.000-00`)
/// whose last two digits are mod-11 check digits of the preceding ones.
pub fn is_valid_cpf(value: &str) -> bool {
    let Some(digits) = cpf_digits(value) else {
        return false;
    };
    if digits.iter().all(|digit| *digit == digits[0]) {
        return false;
    }
    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// The eleven CPF digits without punctuation, or `None` if `value` is not a
/// well-formed CPF. Both accepted layouts of one number normalize to the same string.
pub fn normalize_cpf(value: &str) -> Option<String> {
    is_valid_cpf(value)
        .then(|| cpf_digits(value))
        .flatten()
        .map(|digits| {
            digits
                .iter()
                .filter_map(|digit| char::from_digit(*digit, 10))
                .collect()
        })
}

fn cpf_digits(value: &str) -> Option<Vec<u32>> {
    let bytes = value.as_bytes();
    let plain = match bytes.len() {
        11 => value.to_string(),
        14 if bytes[3] == b'.' && bytes[7] == b'.' && bytes[11] == b'-' => value
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .collect::<String>(),
        _ => return None,
    };
    let digits = plain
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()?;
    (digits.len() == 11).then_some(digits)
}

fn check_digit(digits: &[u32]) -> u32 {
    let heaviest = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=heaviest).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        rest => rest,
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use crate::transfer::{CreateCustomerDto, UpdateCustomerDto};

    use super::{is_valid_cpf, normalize_cpf, validate_create_customer, validate_update_customer};

    fn customer() -> CreateCustomerDto {
        CreateCustomerDto {
            first_name: "João".to_string(),
            last_name: "Silva".to_string(),
            national_id: "28475934625".to_string(),
            income: Decimal::new(1000000, 2),
            email: "joao@email.com".to_string(),
            password: "12345".to_string(),
            zip_code: "12345678".to_string(),
            street: "Rua 1".to_string(),
        }
    }

    #[test]
    fn cpf_check_digits() {
        assert!(is_valid_cpf("28475934625"));
        assert!(is_valid_cpf("284.759.346-25"));
        assert!(!is_valid_cpf("28475934626"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("2847593462"));
        assert!(!is_valid_cpf("284759346-25"));
        assert!(!is_valid_cpf("2847593462a"));
    }

    #[test]
    fn formatted_cpf_normalizes_to_digits() {
        assert_eq!(normalize_cpf("284.759.346-25").as_deref(), Some("28475934625"));
        assert_eq!(normalize_cpf("28475934625").as_deref(), Some("28475934625"));
        assert_eq!(normalize_cpf("284.759.346-26"), None);
    }

    #[test]
    fn income_must_fit_stored_precision() {
        for (income, rule) in [
            (Decimal::new(100005, 3), "scale"),
            (Decimal::new(10_i64.pow(17), 0), "max"),
        ] {
            let dto = CreateCustomerDto {
                income,
                ..customer()
            };
            let violations = validate_create_customer(&dto);
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field(), "income");
            assert_eq!(violations[0].rule(), rule);
        }

        let dto = CreateCustomerDto {
            income: Decimal::new(1000050, 3),
            ..customer()
        };
        assert!(validate_create_customer(&dto).is_empty());
    }

    #[test]
    fn accepts_valid_customer() {
        assert!(validate_create_customer(&customer()).is_empty());
    }

    #[test]
    fn reports_every_broken_field() {
        let dto = CreateCustomerDto {
            first_name: String::new(),
            national_id: "12345678900".to_string(),
            income: Decimal::ZERO,
            email: "not-an-email".to_string(),
            street: "   ".to_string(),
            ..customer()
        };
        let fields = validate_create_customer(&dto)
            .iter()
            .map(|violation| (violation.field(), violation.rule()))
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            vec![
                ("firstName", "not_blank"),
                ("nationalId", "cpf"),
                ("income", "positive"),
                ("email", "email"),
                ("street", "not_blank"),
            ]
        );
    }

    #[test]
    fn update_checks_only_present_fields() {
        let empty = UpdateCustomerDto {
            id: 1,
            first_name: None,
            last_name: None,
            income: None,
            zip_code: None,
            street: None,
        };
        assert!(validate_update_customer(&empty).is_empty());

        let broken = UpdateCustomerDto {
            last_name: Some(String::new()),
            income: Some(Decimal::NEGATIVE_ONE),
            ..empty
        };
        let violations = validate_update_customer(&broken);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field(), "lastName");
        assert_eq!(violations[1].field(), "income");
    }
}
