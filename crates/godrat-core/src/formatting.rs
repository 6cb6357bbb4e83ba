//! User-facing reply texts and list rendering.
//!
//! All replies are plain text in Persian with an emoji prefix per category.

use crate::{class::ClassRecord, intent::InputError};

pub const WELCOME: &str = "👋 سلام! خوش اومدی.\n\n\
با دستور /addclass می‌تونی کلاس جدید ثبت کنی.\n\
با دستور /findclass هم می‌تونی کلاس‌ها رو جستجو کنی.\n\
با دستور /listclasses می‌تونی همه کلاس‌ها رو ببینی.";

pub const ADD_CLASS_HELP: &str = "📝 لطفاً اطلاعات کلاس رو به این شکل بفرست:\n\n\
نام درس | نام استاد | لینک گروه | شماره ترم | primary/other\n\n\
مثال:\n\
سیستم‌عامل | دکتر احمدی | https://t.me/os4041 | 4041 | primary";

pub const FIND_CLASS_HELP: &str = "🔍 لطفاً نام کلاس رو بفرست تا جستجو کنم.\n\n\
مثال:\n\
سیستم‌عامل";

pub const CLASS_SAVED: &str = "✅ کلاس با موفقیت ذخیره شد!";
pub const SAVE_FAILED: &str = "❌ خطا در ذخیره کلاس. لطفاً دوباره امتحان کنید.";

pub const MALFORMED_FIELDS: &str = "❌ فرمت ورودی اشتباه است. لطفاً دوباره امتحان کنید.";
pub const NON_NUMERIC_SEMESTER: &str = "❌ شماره ترم باید عدد باشد.";
pub const INVALID_SEARCH_TERM: &str = "❌ نام جستجو معتبر نیست. لطفاً از حروف معتبر استفاده کنید.";

pub const LIST_QUERY_FAILED: &str = "❌ خطا در دریافت لیست کلاس‌ها. لطفاً دوباره امتحان کنید.";
pub const LIST_DECODE_FAILED: &str = "❌ خطا در پردازش لیست کلاس‌ها. لطفاً دوباره امتحان کنید.";
pub const SEARCH_QUERY_FAILED: &str = "❌ خطا در جستجوی کلاس‌ها. لطفاً دوباره امتحان کنید.";
pub const SEARCH_DECODE_FAILED: &str = "❌ خطا در پردازش نتایج جستجو. لطفاً دوباره امتحان کنید.";

const LIST_HEADER: &str = "📚 لیست همه کلاس‌ها:";
const PRIMARY_HEADER: &str = "🔷 کلاس‌های اصلی:";
const PRIMARY_EMPTY: &str = "🔷 هیچ کلاس اصلی‌ای یافت نشد.";
const OTHER_HEADER: &str = "🔶 کلاس‌های غیر اصلی:";
const OTHER_EMPTY: &str = "🔶 هیچ کلاس غیر اصلی‌ای یافت نشد.";

const SEARCH_HEADER: &str = "📚 کلاس‌های پیدا شده:";
const PRIMARY_TAG: &str = "اصلی";
const OTHER_TAG: &str = "غیر اصلی";

pub fn input_error(e: &InputError) -> &'static str {
    match e {
        InputError::MalformedFields => MALFORMED_FIELDS,
        InputError::NonNumericSemester => NON_NUMERIC_SEMESTER,
        InputError::InvalidSearchTerm => INVALID_SEARCH_TERM,
    }
}

pub fn no_search_results(term: &str) -> String {
    format!("😕 هیچ کلاسی با نام '{term}' پیدا نشد.")
}

/// One line per class: name, instructor, semester, link.
pub fn class_line(c: &ClassRecord) -> String {
    format!(
        "🔹 {} | استاد: {} | ترم: {} | لینک: {}",
        c.name, c.instructor, c.semester, c.link
    )
}

/// Two fixed sections (primary, other); an empty section gets an explicit line.
pub fn render_listing(classes: &[ClassRecord]) -> String {
    let (primary, other): (Vec<&ClassRecord>, Vec<&ClassRecord>) =
        classes.iter().partition(|c| c.is_primary);

    let mut out = String::new();
    out.push_str(LIST_HEADER);
    out.push_str("\n\n");
    push_section(&mut out, PRIMARY_HEADER, PRIMARY_EMPTY, &primary);
    out.push('\n');
    push_section(&mut out, OTHER_HEADER, OTHER_EMPTY, &other);
    out
}

fn push_section(out: &mut String, header: &str, empty: &str, classes: &[&ClassRecord]) {
    if classes.is_empty() {
        out.push_str(empty);
        out.push('\n');
        return;
    }
    out.push_str(header);
    out.push('\n');
    for c in classes {
        out.push_str(&class_line(c));
        out.push('\n');
    }
}

/// Search hits with a primary/non-primary tag; caller handles the empty case.
pub fn render_search_results(classes: &[ClassRecord]) -> String {
    let mut out = format!("{SEARCH_HEADER}\n\n");
    for c in classes {
        let tag = if c.is_primary { PRIMARY_TAG } else { OTHER_TAG };
        out.push_str(&format!("{} | نوع: {tag}\n", class_line(c)));
    }
    out
}
