use std::{borrow::Cow, collections::BTreeMap};

use regex::Regex;

use crate::{
    error::{EditError, ParseError},
    parser::parse,
    quote::quote,
    syntax::{Dict, Document, Entry, Value},
    trivia::{
        collapse_empty_section, detach_above, last_line_start, line_ending, own_line,
        section_begin, section_end,
    },
};

pub const SHELL_SCRIPT_ISA: &str = "PBXShellScriptBuildPhase";
const NATIVE_TARGET_ISA: &str = "PBXNativeTarget";
const DEFAULT_INDENT: &str = "\t\t";
const ID_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    ShellScript,
    Other,
}

/// A build step of some target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPhase {
    pub id: String,
    pub isa: String,
    pub kind: PhaseKind,
    /// Decoded script body, only for shell script phases
    pub shell_script: Option<String>,
    /// `name` of the phase, or the annotation next to its id
    pub label: Option<String>,
}

/// A buildable target and the ids of its phases in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTarget {
    pub id: String,
    pub name: Option<String>,
    pub build_phases: Vec<String>,
}

/// The shell script phase to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellScriptPhase {
    pub label: String,
    pub shell_path: String,
    pub script: String,
}

/// A parsed, structurally validated project file.
///
/// The descriptor keeps the lossless [`Document`]; the typed views
/// ([`phases`](Self::phases), [`targets`](Self::targets)) are read from it on
/// demand, so edits never have to keep two representations in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    document: Document,
    /// `\n` or `\r\n`, as found in the parsed text
    newline: &'static str,
}

fn isa_of(entry: &Entry) -> Option<Cow<'_, str>> {
    entry.value.value.as_dict()?.get("isa")?.as_text()
}

fn build_phase(entry: &Entry) -> Option<BuildPhase> {
    let object = entry.value.value.as_dict()?;
    let isa = object.get("isa")?.as_text()?.into_owned();
    if !isa.ends_with("BuildPhase") {
        return None;
    }
    let kind = if isa == SHELL_SCRIPT_ISA {
        PhaseKind::ShellScript
    } else {
        PhaseKind::Other
    };
    let shell_script = match kind {
        PhaseKind::ShellScript => object
            .get("shellScript")
            .and_then(Value::as_text)
            .map(Cow::into_owned),
        PhaseKind::Other => None,
    };
    let label = object
        .get("name")
        .and_then(Value::as_text)
        .map(Cow::into_owned)
        .or_else(|| entry.annotation().map(str::to_string));
    Some(BuildPhase {
        id: entry.key_text().into_owned(),
        isa,
        kind,
        shell_script,
        label,
    })
}

fn native_target(entry: &Entry) -> Option<NativeTarget> {
    let object = entry.value.value.as_dict()?;
    if object.get("isa")?.as_text()? != NATIVE_TARGET_ISA {
        return None;
    }
    Some(NativeTarget {
        id: entry.key_text().into_owned(),
        name: object.get("name").and_then(Value::as_text).map(Cow::into_owned),
        build_phases: object
            .get("buildPhases")
            .and_then(Value::as_array)
            .map(|phases| phases.texts().map(Cow::into_owned).collect())
            .unwrap_or_default(),
    })
}

const MISSING_OBJECTS: &str = "root object has no `objects` dictionary";

fn missing_objects() -> EditError {
    EditError::Structure(MISSING_OBJECTS.to_string())
}

impl ProjectDescriptor {
    /// Parses and validates project text.
    ///
    /// # Errors
    /// Returns [`ParseError`] for grammar errors, and [`ParseError::Structure`]
    /// when objects lack an `isa` or a target lists a phase that does not exist.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let descriptor = Self {
            document: parse(src)?,
            newline: line_ending(src),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Writes the document back out. Unmodified descriptors reproduce their input byte for byte.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.document.to_string()
    }

    fn validate(&self) -> Result<(), ParseError> {
        let objects = self
            .objects()
            .ok_or_else(|| ParseError::Structure(MISSING_OBJECTS.to_string()))?;
        for entry in &objects.entries {
            if isa_of(entry).is_none() {
                return Err(ParseError::Structure(format!(
                    "object {} is not a dictionary with an isa",
                    entry.key_text()
                )));
            }
        }
        for target in self.targets() {
            if let Some(missing) = target
                .build_phases
                .iter()
                .find(|id| objects.position(id).is_none())
            {
                return Err(ParseError::Structure(format!(
                    "target {} references missing build phase {missing}",
                    target.id
                )));
            }
        }
        Ok(())
    }

    fn objects(&self) -> Option<&Dict> {
        self.document.root.value.as_dict()?.get("objects")?.as_dict()
    }

    fn objects_mut(&mut self) -> Option<&mut Dict> {
        self.document
            .root
            .value
            .as_dict_mut()?
            .get_mut("objects")?
            .as_dict_mut()
    }

    /// Every build phase object keyed by id.
    #[must_use]
    pub fn phases(&self) -> BTreeMap<String, BuildPhase> {
        self.objects()
            .map(|objects| {
                objects
                    .entries
                    .iter()
                    .filter_map(build_phase)
                    .map(|phase| (phase.id.clone(), phase))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Native targets in file order.
    #[must_use]
    pub fn targets(&self) -> Vec<NativeTarget> {
        self.objects()
            .map(|objects| objects.entries.iter().filter_map(native_target).collect())
            .unwrap_or_default()
    }

    /// Target that receives new build phases.
    ///
    /// The first id in the root project's `targets` list that names a native
    /// target; without one, the first native target in file order.
    #[must_use]
    pub fn select_mutation_target(&self) -> Option<String> {
        let objects = self.objects()?;
        let is_native = |id: &str| {
            objects
                .get(id)
                .and_then(Value::as_dict)
                .and_then(|object| object.get("isa"))
                .and_then(Value::as_text)
                .is_some_and(|isa| isa == NATIVE_TARGET_ISA)
        };
        let listed = self
            .document
            .root
            .value
            .as_dict()
            .and_then(|root| root.get("rootObject"))
            .and_then(Value::as_text)
            .and_then(|project| objects.get(&project)?.as_dict()?.get("targets")?.as_array())
            .and_then(|targets| targets.texts().find(|id| is_native(id)));
        listed
            .map(Cow::into_owned)
            .or_else(|| self.targets().into_iter().next().map(|target| target.id))
    }

    /// Shell script phases whose decoded script matches `pattern`.
    #[must_use]
    pub fn shell_script_phases_matching(&self, pattern: &Regex) -> Vec<BuildPhase> {
        self.phases()
            .into_values()
            .filter(|phase| {
                phase.kind == PhaseKind::ShellScript
                    && phase
                        .shell_script
                        .as_deref()
                        .is_some_and(|script| pattern.is_match(script))
            })
            .collect()
    }

    /// Adds `phase` to the mutation target unless a shell script phase
    /// matching `recognition` already exists.
    ///
    /// Returns the id of the new phase, or `None` when nothing changed.
    ///
    /// # Errors
    /// Returns [`EditError::NoMutationTarget`] when the project has no native
    /// target, and [`EditError::Structure`] when the target has no phase list.
    pub fn add_shell_script_phase(
        &mut self,
        phase: &ShellScriptPhase,
        recognition: &Regex,
    ) -> Result<Option<String>, EditError> {
        if !self.shell_script_phases_matching(recognition).is_empty() {
            return Ok(None);
        }
        let target_id = self
            .select_mutation_target()
            .ok_or(EditError::NoMutationTarget)?;
        let id = self.generate_id();
        let newline = self.newline;
        let objects = self.objects_mut().ok_or_else(missing_objects)?;

        let indent = objects
            .entries
            .first()
            .map(|entry| {
                own_line(&entry.key_leading)
                    .trim_start_matches(['\r', '\n'])
                    .to_string()
            })
            .filter(|indent| !indent.is_empty())
            .unwrap_or_else(|| DEFAULT_INDENT.to_string());
        let entry = render_shell_script_phase(&id, phase, &indent, newline)?;

        objects
            .get_mut(&target_id)
            .and_then(Value::as_dict_mut)
            .and_then(|target| target.get_mut("buildPhases"))
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                EditError::Structure(format!("target {target_id} has no buildPhases list"))
            })?
            .push(&id, Some(&phase.label));
        insert_in_section(objects, SHELL_SCRIPT_ISA, entry, &indent, newline);
        Ok(Some(id))
    }

    /// Deletes every shell script phase whose script matches `pattern`, along
    /// with its references in every native target's phase list.
    ///
    /// Returns the removed ids; an empty list when nothing matched.
    pub fn remove_shell_script_phases_matching(&mut self, pattern: &Regex) -> Vec<String> {
        let ids: Vec<String> = self
            .shell_script_phases_matching(pattern)
            .into_iter()
            .map(|phase| phase.id)
            .collect();
        let Some(objects) = self.objects_mut() else {
            return Vec::new();
        };
        for id in &ids {
            if let Some(index) = objects.position(id) {
                objects.remove_at(index);
                collapse_empty_section(objects.leading_after_mut(index), SHELL_SCRIPT_ISA);
            }
        }
        for entry in &mut objects.entries {
            let Some(object) = entry.value.value.as_dict_mut() else {
                continue;
            };
            if object.get("isa").and_then(Value::as_text).as_deref() != Some(NATIVE_TARGET_ISA) {
                continue;
            }
            if let Some(phases) = object.get_mut("buildPhases").and_then(Value::as_array_mut) {
                phases.remove_texts(|text| ids.iter().any(|id| id == text));
            }
        }
        ids
    }

    /// A fresh 24-digit hexadecimal object id.
    fn generate_id(&self) -> String {
        loop {
            let id = nanoid::nanoid!(24, &ID_ALPHABET);
            if self
                .objects()
                .is_none_or(|objects| objects.position(&id).is_none())
            {
                return id;
            }
        }
    }
}

fn render_shell_script_phase(
    id: &str,
    phase: &ShellScriptPhase,
    indent: &str,
    newline: &str,
) -> Result<Entry, EditError> {
    let inner = format!("{indent}\t");
    // quoted values carry no raw line breaks, so every `\n` here is layout
    let fragment = format!(
        "{{\n{indent}{id} /* {annotation} */ = {{\n\
         {inner}isa = {SHELL_SCRIPT_ISA};\n\
         {inner}buildActionMask = 2147483647;\n\
         {inner}files = (\n{inner});\n\
         {inner}inputPaths = (\n{inner});\n\
         {inner}name = {name};\n\
         {inner}outputPaths = (\n{inner});\n\
         {inner}runOnlyForDeploymentPostprocessing = 0;\n\
         {inner}shellPath = {shell_path};\n\
         {inner}shellScript = {script};\n\
         {indent}}};\n}}",
        annotation = phase.label.replace("*/", "* /"),
        name = quote(&phase.label),
        shell_path = quote(&phase.shell_path),
        script = quote(&phase.script),
    )
    .replace('\n', newline);
    let mut document =
        parse(&fragment).map_err(|e| EditError::Structure(format!("rendered phase: {e}")))?;
    document
        .root
        .value
        .as_dict_mut()
        .and_then(|dict| dict.entries.pop())
        .ok_or_else(|| EditError::Structure("rendered phase is empty".to_string()))
}

/// Inserts `entry` among the objects of its `isa`, ordered by id, opening a
/// new section when the file marks sections and this one does not exist yet.
fn insert_in_section(
    objects: &mut Dict,
    isa: &str,
    mut entry: Entry,
    indent: &str,
    newline: &str,
) {
    let id = entry.key_text().into_owned();
    let section: Vec<usize> = objects
        .entries
        .iter()
        .enumerate()
        .filter(|(_, other)| isa_of(other).as_deref() == Some(isa))
        .map(|(index, _)| index)
        .collect();

    if let (Some(&first), Some(&last)) = (section.first(), section.last()) {
        let index = section
            .iter()
            .copied()
            .find(|&index| *objects.entries[index].key_text() > *id)
            .unwrap_or(last + 1);
        if index == first {
            // take over the section's opening comment
            let above = detach_above(&mut objects.entries[first].key_leading);
            entry.key_leading.insert_str(0, &above);
        }
        objects.entries.insert(index, entry);
        return;
    }

    let index = objects
        .entries
        .iter()
        .position(|other| isa_of(other).is_some_and(|other| &*other > isa))
        .unwrap_or(objects.entries.len());
    let sectioned = objects
        .entries
        .iter()
        .any(|other| other.key_leading.contains("/* Begin "));
    if !sectioned {
        objects.entries.insert(index, entry);
        return;
    }

    let next_leading = objects.leading_after_mut(index);
    let begin = section_begin(isa);
    let end = section_end(isa);
    match next_leading.find("/* Begin ") {
        Some(at) => {
            let rest = next_leading.split_off(at);
            entry.key_leading = format!("{next_leading}{begin}{newline}{indent}");
            *next_leading = format!("{newline}{end}{newline}{newline}{rest}");
        }
        None => {
            let rest = next_leading.split_off(last_line_start(next_leading));
            entry.key_leading = format!("{next_leading}{newline}{newline}{begin}{newline}{indent}");
            *next_leading = format!("{newline}{end}{rest}");
        }
    }
    objects.entries.insert(index, entry);
}
