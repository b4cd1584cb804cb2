//! Recording [`GlApi`] backend for tests.
//!
//! Keeps just enough object state to answer status queries and to count what
//! is still alive. Shader "compilation" checks for a `#version 300 es` header,
//! a `main` function and balanced brackets; anything else is a syntax error.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::color::Color;
use crate::geometry::{DrawCall, Primitive, VertexLayout};

use super::types::{
    AttribSource, BufferId, BufferTarget, BufferUsage, IndexSource, ProgramId, ShaderId,
    ShaderStage,
};
use super::GlApi;

pub(crate) const VALID_VERTEX: &str = "#version 300 es
layout(location = 0) in vec4 a_position;
layout(location = 1) in vec4 a_color;
out vec4 v_color;
void main()
{
    v_color = a_color;
    gl_Position = a_position;
}";

pub(crate) const VALID_FRAGMENT: &str = "#version 300 es
precision mediump float;
in vec4 v_color;
out vec4 o_fragColor;
void main()
{
    o_fragColor = v_color;
}";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GlCall {
    CreateShader(ShaderStage),
    ShaderSource(ShaderId),
    CompileShader(ShaderId),
    ShaderInfoLog(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram,
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    ProgramInfoLog(ProgramId),
    DeleteProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    CreateBuffer,
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData {
        target: BufferTarget,
        buffer: Option<BufferId>,
        len: usize,
        usage: BufferUsage,
    },
    DeleteBuffers(Vec<BufferId>),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer {
        layout: VertexLayout,
        host: bool,
        buffer: Option<BufferId>,
    },
    VertexAttrib4f(u32, [f32; 4]),
    DrawElements { call: DrawCall, host: bool },
    DrawArrays { primitive: Primitive, first: i32, count: i32 },
    Viewport(i32, i32, i32, i32),
    ClearColor(Color),
    Clear,
}

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: String,
    /// `None` until compiled; `Some(Err(log))` after a failed compile.
    result: Option<Result<(), String>>,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderId>,
    link_log: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<GlCall>,
    next_name: u32,

    shaders: HashMap<ShaderId, MockShader>,
    programs: HashMap<ProgramId, MockProgram>,
    buffers: HashSet<BufferId>,

    bound_array: Option<BufferId>,
    bound_element: Option<BufferId>,
    enabled: BTreeSet<u32>,
    current_program: Option<ProgramId>,

    empty_info_logs: bool,
    fail_shader_alloc: bool,
    fail_program_alloc: bool,
    forced_link_log: Option<String>,
    buffer_budget: Option<usize>,
}

impl State {
    fn name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn bound(&self, target: BufferTarget) -> Option<BufferId> {
        match target {
            BufferTarget::Array => self.bound_array,
            BufferTarget::ElementArray => self.bound_element,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingGl {
    state: RefCell<State>,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }

    // ── failure injection ─────────────────────────────────────────────────

    /// Reports an info-log length of 1 (NUL only) for every failed object.
    pub(crate) fn set_empty_info_logs(&self, on: bool) {
        self.state.borrow_mut().empty_info_logs = on;
    }

    pub(crate) fn fail_shader_allocation(&self, on: bool) {
        self.state.borrow_mut().fail_shader_alloc = on;
    }

    pub(crate) fn fail_program_allocation(&self, on: bool) {
        self.state.borrow_mut().fail_program_alloc = on;
    }

    /// Makes every subsequent link fail with `log`.
    pub(crate) fn fail_link(&self, log: &str) {
        self.state.borrow_mut().forced_link_log = Some(log.to_string());
    }

    /// Lets `n` more buffers be created, then hands out `0`.
    pub(crate) fn fail_buffer_allocation_after(&self, n: usize) {
        self.state.borrow_mut().buffer_budget = Some(n);
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub(crate) fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub(crate) fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub(crate) fn current_program(&self) -> Option<ProgramId> {
        self.state.borrow().current_program
    }

    pub(crate) fn bound(&self, target: BufferTarget) -> Option<BufferId> {
        self.state.borrow().bound(target)
    }

    /// Currently enabled attribute arrays, ascending.
    pub(crate) fn enabled_attributes(&self) -> Vec<u32> {
        self.state.borrow().enabled.iter().copied().collect()
    }

    /// Sizes of every `bufferData` upload to `target`, in call order.
    pub(crate) fn uploads(&self, target: BufferTarget) -> Vec<usize> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::BufferData { target: t, len, .. } if *t == target => Some(*len),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn uploads_all_static(&self) -> bool {
        self.state.borrow().calls.iter().all(|c| match c {
            GlCall::BufferData { usage, buffer, .. } => {
                *usage == BufferUsage::StaticDraw && buffer.is_some()
            }
            _ => true,
        })
    }

    /// Every attribute pointer call as `(layout, from_host_memory)`.
    pub(crate) fn attrib_pointers(&self) -> Vec<(VertexLayout, bool)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::AttribPointer { layout, host, .. } => Some((*layout, *host)),
                _ => None,
            })
            .collect()
    }

    /// Every attribute pointer call with the `ARRAY_BUFFER` bound at the time.
    pub(crate) fn attrib_pointers_with_buffers(&self) -> Vec<(VertexLayout, Option<BufferId>)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::AttribPointer { layout, buffer, .. } => Some((*layout, *buffer)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn draw_calls(&self) -> Vec<DrawCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::DrawElements { call, .. } => Some(*call),
                _ => None,
            })
            .collect()
    }
}

/// Minimal stand-in for a GLSL front end.
fn check_source(source: &str) -> Result<(), String> {
    if !source.trim_start().starts_with("#version 300 es") {
        return Err("ERROR: 0:1: '' : missing #version 300 es".to_string());
    }
    if !source.contains("void main") {
        return Err("ERROR: 0:0: '' : missing main function".to_string());
    }
    for (open, close) in [('(', ')'), ('{', '}')] {
        let mut depth = 0i32;
        for (line_no, line) in source.lines().enumerate() {
            for ch in line.chars() {
                if ch == open {
                    depth += 1;
                } else if ch == close {
                    depth -= 1;
                }
                if depth < 0 {
                    return Err(format!("ERROR: 0:{}: '{close}' : syntax error", line_no + 1));
                }
            }
        }
        if depth != 0 {
            let last = source.lines().count();
            return Err(format!("ERROR: 0:{last}: '{open}' : syntax error, unexpected end of file"));
        }
    }
    Ok(())
}

fn log_length(log: &str, empty_logs: bool) -> i32 {
    if empty_logs { 1 } else { log.len() as i32 + 1 }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        self.record(GlCall::CreateShader(stage));
        let mut st = self.state.borrow_mut();
        if st.fail_shader_alloc {
            return None;
        }
        let id = ShaderId::from_raw(st.name())?;
        st.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                result: None,
            },
        );
        Some(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.record(GlCall::ShaderSource(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        self.record(GlCall::CompileShader(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.result = Some(check_source(&s.source));
        }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let st = self.state.borrow();
        matches!(st.shaders.get(&shader).and_then(|s| s.result.as_ref()), Some(Ok(())))
    }

    fn shader_info_log_length(&self, shader: ShaderId) -> i32 {
        let st = self.state.borrow();
        match st.shaders.get(&shader).and_then(|s| s.result.as_ref()) {
            Some(Err(log)) => log_length(log, st.empty_info_logs),
            _ => 0,
        }
    }

    fn shader_info_log(&self, shader: ShaderId, length: i32) -> String {
        self.record(GlCall::ShaderInfoLog(shader));
        let st = self.state.borrow();
        let log = match st.shaders.get(&shader).and_then(|s| s.result.as_ref()) {
            Some(Err(log)) => log.as_str(),
            _ => "",
        };
        log.chars().take(length.max(0) as usize).collect()
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record(GlCall::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Option<ProgramId> {
        self.record(GlCall::CreateProgram);
        let mut st = self.state.borrow_mut();
        if st.fail_program_alloc {
            return None;
        }
        let id = ProgramId::from_raw(st.name())?;
        st.programs.insert(id, MockProgram::default());
        Some(id)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::AttachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::DetachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: ProgramId) {
        self.record(GlCall::LinkProgram(program));
        let mut st = self.state.borrow_mut();
        let forced = st.forced_link_log.clone();

        let Some(attached) = st.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };
        let compiled: Vec<ShaderStage> = attached
            .iter()
            .filter_map(|id| st.shaders.get(id))
            .filter(|s| matches!(s.result, Some(Ok(()))))
            .map(|s| s.stage)
            .collect();
        let complete = compiled.len() == attached.len()
            && compiled.contains(&ShaderStage::Vertex)
            && compiled.contains(&ShaderStage::Fragment);

        let log = match forced {
            Some(log) => Some(log),
            None if !complete => {
                Some("error: program needs a compiled vertex and fragment shader".to_string())
            }
            None => None,
        };
        if let Some(p) = st.programs.get_mut(&program) {
            p.link_log = log;
        }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        let st = self.state.borrow();
        st.programs.get(&program).is_some_and(|p| p.link_log.is_none())
    }

    fn program_info_log_length(&self, program: ProgramId) -> i32 {
        let st = self.state.borrow();
        match st.programs.get(&program).and_then(|p| p.link_log.as_deref()) {
            Some(log) => log_length(log, st.empty_info_logs),
            None => 0,
        }
    }

    fn program_info_log(&self, program: ProgramId, length: i32) -> String {
        self.record(GlCall::ProgramInfoLog(program));
        let st = self.state.borrow();
        let log = st
            .programs
            .get(&program)
            .and_then(|p| p.link_log.as_deref())
            .unwrap_or("");
        log.chars().take(length.max(0) as usize).collect()
    }

    fn delete_program(&self, program: ProgramId) {
        self.record(GlCall::DeleteProgram(program));
        let mut st = self.state.borrow_mut();
        st.programs.remove(&program);
        if st.current_program == Some(program) {
            st.current_program = None;
        }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(GlCall::UseProgram(program));
        self.state.borrow_mut().current_program = program;
    }

    fn create_buffer(&self) -> Option<BufferId> {
        self.record(GlCall::CreateBuffer);
        let mut st = self.state.borrow_mut();
        if let Some(remaining) = st.buffer_budget.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let id = BufferId::from_raw(st.name())?;
        st.buffers.insert(id);
        Some(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record(GlCall::BindBuffer(target, buffer));
        let mut st = self.state.borrow_mut();
        match target {
            BufferTarget::Array => st.bound_array = buffer,
            BufferTarget::ElementArray => st.bound_element = buffer,
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let buffer = self.state.borrow().bound(target);
        self.record(GlCall::BufferData {
            target,
            buffer,
            len: data.len(),
            usage,
        });
    }

    fn delete_buffers(&self, buffers: &[BufferId]) {
        self.record(GlCall::DeleteBuffers(buffers.to_vec()));
        let mut st = self.state.borrow_mut();
        for b in buffers {
            st.buffers.remove(b);
            if st.bound_array == Some(*b) {
                st.bound_array = None;
            }
            if st.bound_element == Some(*b) {
                st.bound_element = None;
            }
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableAttrib(index));
        self.state.borrow_mut().enabled.insert(index);
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::DisableAttrib(index));
        self.state.borrow_mut().enabled.remove(&index);
    }

    unsafe fn vertex_attrib_pointer(&self, layout: &VertexLayout, source: AttribSource<'_>) {
        let buffer = self.state.borrow().bound_array;
        let host = match source {
            AttribSource::Host(bytes) => {
                assert!(buffer.is_none(), "host pointer with ARRAY_BUFFER bound");
                assert!(layout.offset + layout.components * 4 <= bytes.len());
                true
            }
            AttribSource::Bound => {
                assert!(buffer.is_some(), "buffer offset with no ARRAY_BUFFER bound");
                false
            }
        };
        self.record(GlCall::AttribPointer {
            layout: *layout,
            host,
            buffer,
        });
    }

    fn vertex_attrib_4f(&self, index: u32, value: [f32; 4]) {
        self.record(GlCall::VertexAttrib4f(index, value));
    }

    fn draw_elements(&self, call: &DrawCall, indices: IndexSource<'_>) {
        let element = self.state.borrow().bound_element;
        let host = match indices {
            IndexSource::Host(data) => {
                assert!(element.is_none(), "host indices with ELEMENT_ARRAY_BUFFER bound");
                assert_eq!(data.len(), call.index_count as usize);
                true
            }
            IndexSource::Bound => {
                assert!(element.is_some(), "no ELEMENT_ARRAY_BUFFER bound");
                false
            }
        };
        self.record(GlCall::DrawElements { call: *call, host });
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        self.record(GlCall::DrawArrays {
            primitive,
            first,
            count,
        });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: Color) {
        self.record(GlCall::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::Clear);
    }
}
