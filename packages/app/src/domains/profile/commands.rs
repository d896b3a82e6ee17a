/// Profile commands - IO the profile machine asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    Fetch { phone_number: String },
}
